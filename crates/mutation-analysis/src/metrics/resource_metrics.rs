//! Per-file mutation counters.

use crate::model::{Mutant, MutantState};
use crate::sensors::InputFile;

/// The mutants of one source file and their counts by state.
#[derive(Debug, Clone)]
pub struct ResourceMutationMetrics {
    resource: InputFile,
    mutants: Vec<Mutant>,
    total: u32,
    no_coverage: u32,
    killed: u32,
    survived: u32,
    memory_error: u32,
    timed_out: u32,
    unknown: u32,
    detected: u32,
    tests_run: u32,
}

impl ResourceMutationMetrics {
    pub fn new(resource: InputFile) -> Self {
        Self {
            resource,
            mutants: Vec::new(),
            total: 0,
            no_coverage: 0,
            killed: 0,
            survived: 0,
            memory_error: 0,
            timed_out: 0,
            unknown: 0,
            detected: 0,
            tests_run: 0,
        }
    }

    pub fn add_mutant(&mut self, mutant: Mutant) {
        if mutant.is_detected() {
            self.detected += 1;
        }
        self.total += 1;
        self.tests_run += mutant.number_of_tests_run();
        match mutant.state() {
            MutantState::Killed => self.killed += 1,
            MutantState::NoCoverage => self.no_coverage += 1,
            MutantState::Survived => self.survived += 1,
            MutantState::MemoryError => self.memory_error += 1,
            MutantState::TimedOut => self.timed_out += 1,
            MutantState::Unknown => self.unknown += 1,
            MutantState::RunError | MutantState::NonViable => {}
        }
        self.mutants.push(mutant);
    }

    pub fn resource(&self) -> &InputFile {
        &self.resource
    }

    pub fn mutants(&self) -> &[Mutant] {
        &self.mutants
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn no_coverage(&self) -> u32 {
        self.no_coverage
    }

    pub fn killed(&self) -> u32 {
        self.killed
    }

    pub fn survived(&self) -> u32 {
        self.survived
    }

    pub fn memory_error(&self) -> u32 {
        self.memory_error
    }

    pub fn timed_out(&self) -> u32 {
        self.timed_out
    }

    pub fn unknown(&self) -> u32 {
        self.unknown
    }

    pub fn detected(&self) -> u32 {
        self.detected
    }

    /// Mutants not detected by any test.
    pub fn alive(&self) -> u32 {
        self.total - self.detected
    }

    pub fn tests_run(&self) -> u32 {
        self.tests_run
    }

    /// Percentage of mutants killed by tests; 0 without mutants.
    pub fn mutation_coverage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            100.0 * f64::from(self.killed) / f64::from(self.total)
        }
    }
}
