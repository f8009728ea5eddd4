//! Recording doubles of the driver's collaborators, for host tests

use std::collections::VecDeque;
use std::vec::Vec;

use embedded_hal::blocking::delay::DelayMs;
use fugit_timer::{MicrosDurationU32, MillisDurationU32};

use crate::bus::BusTransport;
use crate::command::{PulseCommand, PulseCommandSource};
use crate::support::Scheduler;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    Write(Vec<u8>),
    Read(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

/// Bus that logs every attempted transaction and returns scripted bytes.
#[derive(Debug, Default)]
pub struct MockBus {
    transactions: Vec<Transaction>,
    read_data: VecDeque<u8>,
    fail_at: Vec<usize>,
    fail_all: bool,
}

impl MockBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_read(&mut self, data: &[u8]) {
        self.read_data.extend(data.iter().copied());
    }

    /// Fail the transaction with the given index (counted from creation)
    pub fn fail_at(&mut self, index: usize) {
        self.fail_at.push(index);
    }

    pub fn fail_all(&mut self) {
        self.fail_all = true;
    }

    pub fn recover(&mut self) {
        self.fail_all = false;
        self.fail_at.clear();
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.transactions
            .iter()
            .filter_map(|t| match t {
                Transaction::Write(w) => Some(w.clone()),
                Transaction::Read(_) => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.transactions.clear();
    }
}

impl BusTransport for MockBus {
    type Error = MockError;

    fn transfer(&mut self, write: &[u8], read: &mut [u8]) -> Result<(), MockError> {
        let index = self.transactions.len();
        if !write.is_empty() {
            self.transactions.push(Transaction::Write(write.to_vec()));
        }
        if !read.is_empty() {
            self.transactions.push(Transaction::Read(read.len()));
        }

        if self.fail_all || self.fail_at.contains(&index) {
            return Err(MockError);
        }

        for b in read.iter_mut() {
            *b = self.read_data.pop_front().unwrap_or(0);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    Now,
    After(u32),
}

#[derive(Debug, Default)]
pub struct MockScheduler {
    pub calls: Vec<Schedule>,
}

impl Scheduler for MockScheduler {
    fn schedule_now(&mut self) {
        self.calls.push(Schedule::Now);
    }

    fn schedule_after(&mut self, delay: MicrosDurationU32) {
        self.calls.push(Schedule::After(delay.ticks()));
    }
}

#[derive(Debug, Default)]
pub struct MockDelay {
    pub delays_ms: Vec<u8>,
}

impl DelayMs<u8> for MockDelay {
    fn delay_ms(&mut self, ms: u8) {
        self.delays_ms.push(ms);
    }
}

/// Command source fed directly by the test
#[derive(Debug, Default)]
pub struct MockCommands {
    pub pending: VecDeque<PulseCommand>,
    pub subscriptions: Vec<u32>,
}

impl MockCommands {
    pub fn publish(&mut self, cmd: PulseCommand) {
        self.pending.push_back(cmd);
    }
}

impl PulseCommandSource for MockCommands {
    fn subscribe(&mut self, interval: MillisDurationU32) {
        self.subscriptions.push(interval.ticks());
    }

    fn poll(&mut self) -> Option<PulseCommand> {
        self.pending.pop_front()
    }
}
