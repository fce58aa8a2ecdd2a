//! Mock interface implementation for testing the BMA023 driver

#[cfg(feature = "async")]
use device_driver::AsyncRegisterInterface;
use device_driver::RegisterInterface;
use std::cell::RefCell;
use std::rc::Rc;

/// Addresses covered by the mock: the register map plus the EEPROM cells
const MOCK_SPACE: usize = 0x40;

/// Records operations performed on the mock interface
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// One read transaction
    Read {
        /// First register address
        address: u8,
        /// Number of bytes read
        len: usize,
    },
    /// One write transaction
    Write {
        /// First register address
        address: u8,
        /// Bytes written, lowest address first
        data: Vec<u8>,
    },
}

/// Shared state for mock interface (uses interior mutability)
struct MockState {
    /// Simulated register values, EEPROM cells at `0x2B`-`0x3D`
    registers: [u8; MOCK_SPACE],

    /// Operations log for verification
    operations: Vec<Operation>,

    /// Failure injection flags
    fail_next_read: bool,
    fail_next_write: bool,

    /// Drop writes to image registers while EE_W is clear
    enforce_ee_w: bool,

    /// Runs once, right after the next read completes
    after_read: Option<Box<dyn FnOnce()>>,
}

impl MockState {
    fn new() -> Self {
        let mut registers = [0u8; MOCK_SPACE];
        // CHIP_ID = 0x02, ML version 1, AL version 2
        registers[0x00] = 0x02;
        registers[0x01] = 0x21;

        Self {
            registers,
            operations: Vec::new(),
            fail_next_read: false,
            fail_next_write: false,
            enforce_ee_w: false,
            after_read: None,
        }
    }

    fn ee_w(&self) -> bool {
        self.registers[0x0A] & 0x10 != 0
    }
}

/// Mock interface for testing
#[derive(Clone)]
pub struct MockInterface {
    state: Rc<RefCell<MockState>>,
}

impl MockInterface {
    /// Create a new mock interface with default register values
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(MockState::new())),
        }
    }

    /// Set a register value
    #[allow(dead_code)]
    pub fn set_register(&self, address: u8, value: u8) {
        self.state.borrow_mut().registers[usize::from(address)] = value;
    }

    /// Get a register value
    #[allow(dead_code)]
    pub fn get_register(&self, address: u8) -> u8 {
        self.state.borrow().registers[usize::from(address)]
    }

    /// Set the chip id register
    #[allow(dead_code)]
    pub fn set_chip_id(&self, value: u8) {
        self.set_register(0x00, value);
    }

    /// Set raw axis data (10-bit two's complement) and new-data flags
    #[allow(dead_code)]
    pub fn set_accel_data(&self, x: i16, y: i16, z: i16, new_data: bool) {
        let mut state = self.state.borrow_mut();
        for (i, value) in [x, y, z].into_iter().enumerate() {
            let raw = (value as u16) & 0x3FF;
            let lsb = (((raw & 0x03) as u8) << 6) | u8::from(new_data);
            let msb = (raw >> 2) as u8;
            state.registers[0x02 + 2 * i] = lsb;
            state.registers[0x03 + 2 * i] = msb;
        }
    }

    /// Only accept writes to `0x0B`-`0x1D` while `EE_W` is set
    #[allow(dead_code)]
    pub fn enforce_ee_w(&self, enable: bool) {
        self.state.borrow_mut().enforce_ee_w = enable;
    }

    /// Run `hook` once, after the next read transaction has returned its data
    ///
    /// The hook runs with the mock's state released, so it may drive another
    /// driver that shares this interface.
    #[allow(dead_code)]
    pub fn after_next_read(&self, hook: impl FnOnce() + 'static) {
        self.state.borrow_mut().after_read = Some(Box::new(hook));
    }

    /// Inject a read failure on the next read operation
    #[allow(dead_code)]
    pub fn fail_next_read(&self) {
        self.state.borrow_mut().fail_next_read = true;
    }

    /// Inject a write failure on the next write operation
    #[allow(dead_code)]
    pub fn fail_next_write(&self) {
        self.state.borrow_mut().fail_next_write = true;
    }

    /// Get the operations log
    #[allow(dead_code)]
    pub fn operations(&self) -> Vec<Operation> {
        self.state.borrow().operations.clone()
    }

    /// Clear the operations log
    #[allow(dead_code)]
    pub fn clear_operations(&self) {
        self.state.borrow_mut().operations.clear();
    }

    /// Write transactions in order, as `(address, data)`
    #[allow(dead_code)]
    pub fn writes(&self) -> Vec<(u8, Vec<u8>)> {
        self.state
            .borrow()
            .operations
            .iter()
            .filter_map(|op| match op {
                Operation::Write { address, data } => Some((*address, data.clone())),
                Operation::Read { .. } => None,
            })
            .collect()
    }

    /// Count read transactions
    #[allow(dead_code)]
    pub fn read_count(&self) -> usize {
        self.state
            .borrow()
            .operations
            .iter()
            .filter(|op| matches!(op, Operation::Read { .. }))
            .count()
    }
}

/// Mock error type
#[derive(Debug, Clone, PartialEq)]
pub enum MockError {
    /// Simulated communication error
    Communication,
    /// Transfer runs past the simulated address space
    AddressOverflow,
}

impl RegisterInterface for MockInterface {
    type Error = MockError;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let hook = {
            let mut state = self.state.borrow_mut();

            // Check for injected failure
            if state.fail_next_read {
                state.fail_next_read = false;
                return Err(MockError::Communication);
            }

            let start = usize::from(address);
            let end = start + read_data.len();
            if end > MOCK_SPACE {
                return Err(MockError::AddressOverflow);
            }

            read_data.copy_from_slice(&state.registers[start..end]);
            state.operations.push(Operation::Read {
                address,
                len: read_data.len(),
            });

            state.after_read.take()
        };

        if let Some(hook) = hook {
            hook();
        }

        Ok(())
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();

        // Check for injected failure
        if state.fail_next_write {
            state.fail_next_write = false;
            return Err(MockError::Communication);
        }

        let start = usize::from(address);
        if start + write_data.len() > MOCK_SPACE {
            return Err(MockError::AddressOverflow);
        }

        state.operations.push(Operation::Write {
            address,
            data: write_data.to_vec(),
        });

        let locked = state.enforce_ee_w && !state.ee_w();
        for (i, &byte) in write_data.iter().enumerate() {
            let reg_addr = start + i;
            if locked && (0x0B..=0x1D).contains(&reg_addr) {
                continue;
            }
            state.registers[reg_addr] = byte;
        }

        Ok(())
    }
}

#[cfg(feature = "async")]
impl AsyncRegisterInterface for MockInterface {
    type Error = MockError;
    type AddressType = u8;

    async fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        // Delegate to synchronous implementation
        RegisterInterface::read_register(self, address, size_bits, read_data)
    }

    async fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        // Delegate to synchronous implementation
        RegisterInterface::write_register(self, address, size_bits, write_data)
    }
}

impl Default for MockInterface {
    fn default() -> Self {
        Self::new()
    }
}
