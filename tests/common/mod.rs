//! Fakes for the clock's collaborators, shared by the host tests.
#![allow(dead_code, reason = "Each test binary uses a different subset")]

use std::collections::VecDeque;

use embassy_time::Instant;
use embedded_hal::i2c::{self, ErrorKind, ErrorType, NoAcknowledgeSource, Operation};
use tix_clock::frame::{Frame, PixelOutput};
use tix_clock::settings_store::{RECORD_SIZE, RecordStorage};
use tix_clock::time_of_day::TimeOfDay;
use tix_clock::time_source::TimeSource;
use tix_clock::{Error, Result};

pub fn at(millis: u64) -> Instant {
    Instant::from_millis(millis)
}

pub fn time(hour: u8, minute: u8, second: u8) -> TimeOfDay {
    TimeOfDay::new(hour, minute, second).expect("valid time")
}

/// In-memory real-time clock.
#[derive(Debug, Default)]
pub struct FakeTimeSource {
    pub time: TimeOfDay,
    pub absent: bool,
    pub lost_power: bool,
    /// Reads after this many successful ones fail.
    pub fail_reads_after: Option<usize>,
    /// Times reported by successive reads before falling back to `time`.
    pub script: VecDeque<TimeOfDay>,
    pub reads: usize,
    pub writes: Vec<TimeOfDay>,
}

impl FakeTimeSource {
    pub fn at(time: TimeOfDay) -> Self {
        Self {
            time,
            ..Self::default()
        }
    }
}

impl TimeSource for FakeTimeSource {
    fn now(&mut self) -> Result<TimeOfDay> {
        if self.absent {
            return Err(Error::RtcNotFound);
        }
        if self.fail_reads_after.is_some_and(|limit| self.reads >= limit) {
            return Err(Error::Rtc);
        }
        self.reads += 1;
        if let Some(next) = self.script.pop_front() {
            self.time = next;
        }
        Ok(self.time)
    }

    fn set(&mut self, time: TimeOfDay) -> Result<()> {
        if self.absent {
            return Err(Error::RtcNotFound);
        }
        self.time = time;
        self.lost_power = false;
        self.writes.push(time);
        Ok(())
    }

    fn lost_power(&mut self) -> Result<bool> {
        if self.absent {
            return Err(Error::RtcNotFound);
        }
        Ok(self.lost_power)
    }
}

/// Pixel output that keeps every committed frame.
#[derive(Debug)]
pub struct RecordingOutput {
    pub brightness: u8,
    pub brightness_history: Vec<u8>,
    pub commits: Vec<Frame>,
}

impl Default for RecordingOutput {
    fn default() -> Self {
        Self {
            brightness: 255,
            brightness_history: Vec::new(),
            commits: Vec::new(),
        }
    }
}

impl RecordingOutput {
    pub fn last(&self) -> &Frame {
        self.commits.last().expect("at least one commit")
    }
}

impl PixelOutput for RecordingOutput {
    fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
        self.brightness_history.push(brightness);
    }

    fn commit(&mut self, frame: &Frame) {
        self.commits.push(*frame);
    }
}

/// A settings region in memory, erased (all `0xFF`) to start with.
#[derive(Debug)]
pub struct MemoryStorage {
    pub bytes: [u8; RECORD_SIZE],
    pub writes: usize,
    pub fail: bool,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self {
            bytes: [0xFF; RECORD_SIZE],
            writes: 0,
            fail: false,
        }
    }
}

impl RecordStorage for MemoryStorage {
    fn read_record(&mut self) -> Result<[u8; RECORD_SIZE]> {
        if self.fail {
            return Err(Error::StorageCorrupted);
        }
        Ok(self.bytes)
    }

    fn write_record(&mut self, bytes: &[u8; RECORD_SIZE]) -> Result<()> {
        if self.fail {
            return Err(Error::StorageCorrupted);
        }
        self.bytes = *bytes;
        self.writes += 1;
        Ok(())
    }
}

/// Error type for [`ScriptedI2c`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusError(pub ErrorKind);

impl i2c::Error for BusError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

/// A register-file device on a fake I²C bus.
///
/// A write sets the register pointer from its first byte and stores any further bytes
/// from there on; a read returns bytes from the pointer on. Every transaction is logged.
#[derive(Debug)]
pub struct ScriptedI2c {
    pub address: u8,
    pub registers: [u8; 0x13],
    pub pointer: usize,
    pub present: bool,
    pub failures: VecDeque<ErrorKind>,
    pub writes: Vec<Vec<u8>>,
}

impl ScriptedI2c {
    pub fn new(address: u8) -> Self {
        Self {
            address,
            registers: [0; 0x13],
            pointer: 0,
            present: true,
            failures: VecDeque::new(),
            writes: Vec::new(),
        }
    }
}

impl ErrorType for ScriptedI2c {
    type Error = BusError;
}

impl i2c::I2c for ScriptedI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> core::result::Result<(), Self::Error> {
        if !self.present || address != self.address {
            return Err(BusError(ErrorKind::NoAcknowledge(
                NoAcknowledgeSource::Address,
            )));
        }
        if let Some(kind) = self.failures.pop_front() {
            return Err(BusError(kind));
        }
        for operation in operations {
            match operation {
                Operation::Write(bytes) => {
                    self.writes.push(bytes.to_vec());
                    if let Some((&register, data)) = bytes.split_first() {
                        self.pointer = usize::from(register);
                        for &byte in data {
                            self.registers[self.pointer] = byte;
                            self.pointer += 1;
                        }
                    }
                }
                Operation::Read(buffer) => {
                    for byte in buffer.iter_mut() {
                        *byte = self.registers[self.pointer];
                        self.pointer += 1;
                    }
                }
            }
        }
        Ok(())
    }
}
