//! Bus interface implementations for the BMA023
//!
//! Both interfaces implement the `device-driver` register traits, which is
//! the only thing the driver needs from a transport: read `n` bytes starting
//! at a register address, and write `n` bytes starting at a register address.
//! The chip auto-increments the address on multi-byte transfers.

use crate::{I2C_ADDRESS, SPI_READ_FLAG};

use crate::Error;
use device_driver::RegisterInterface;

/// Largest burst the interfaces forward in one transaction (the full map is 30 bytes)
///
/// Longer writes are cut to this length. `Bma023Driver` rejects transfers
/// that leave the register map before they get here.
const MAX_BURST: usize = 32;

/// I2C interface for the BMA023
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Create a new I2C interface at the fixed BMA023 address (0x38)
    ///
    /// # Example
    /// ```ignore
    /// let interface = I2cInterface::default(i2c);
    /// let mut accel = Bma023Driver::new(interface)?;
    /// ```
    pub const fn default(i2c: I2C) -> Self {
        Self {
            i2c,
            address: I2C_ADDRESS,
        }
    }

    /// Create a new I2C interface with a custom device address
    ///
    /// Useful behind address translators or muxes; the chip itself always
    /// answers at [`I2C_ADDRESS`].
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// 7-bit bus address used by this interface
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Consume the interface and return the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> RegisterInterface for I2cInterface<I2C>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.i2c.write_read(self.address, &[address], read_data)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let mut buffer = [0u8; MAX_BURST + 1];
        buffer[0] = address;
        let len = write_data.len().min(MAX_BURST);
        buffer[1..=len].copy_from_slice(&write_data[..len]);

        self.i2c.write(self.address, &buffer[..=len])
    }
}

#[cfg(feature = "async")]
impl<I2C, E> device_driver::AsyncRegisterInterface for I2cInterface<I2C>
where
    I2C: embedded_hal_async::i2c::I2c<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    async fn read_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.i2c
            .write_read(self.address, &[address], read_data)
            .await
    }

    async fn write_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let mut buffer = [0u8; MAX_BURST + 1];
        buffer[0] = address;
        let len = write_data.len().min(MAX_BURST);
        buffer[1..=len].copy_from_slice(&write_data[..len]);

        self.i2c.write(self.address, &buffer[..=len]).await
    }
}

/// SPI interface for the BMA023
///
/// Chip select is handled by the `SpiDevice` implementation. The chip starts
/// in 3-wire mode; set the `SPI4` bit (see
/// [`Bma023Driver::set_spi4`](crate::device::Bma023Driver::set_spi4)) before
/// using a 4-wire bus for reads.
pub struct SpiInterface<SPI> {
    spi: SPI,
}

impl<SPI> SpiInterface<SPI> {
    /// Create a new SPI interface with the given SPI device
    pub const fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Consume the interface and return the SPI device
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI, E> RegisterInterface for SpiInterface<SPI>
where
    SPI: embedded_hal::spi::SpiDevice<Error = E>,
{
    type Error = Error<E>;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let mut operations = [
            embedded_hal::spi::Operation::Write(&[address | SPI_READ_FLAG]),
            embedded_hal::spi::Operation::Read(read_data),
        ];

        self.spi.transaction(&mut operations).map_err(Error::Bus)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let mut buffer = [0u8; MAX_BURST + 1];
        buffer[0] = address & !SPI_READ_FLAG;
        let len = write_data.len().min(MAX_BURST);
        buffer[1..=len].copy_from_slice(&write_data[..len]);

        self.spi.write(&buffer[..=len]).map_err(Error::Bus)
    }
}

#[cfg(feature = "async")]
impl<SPI, E> device_driver::AsyncRegisterInterface for SpiInterface<SPI>
where
    SPI: embedded_hal_async::spi::SpiDevice<Error = E>,
{
    type Error = Error<E>;
    type AddressType = u8;

    async fn read_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let mut operations = [
            embedded_hal_async::spi::Operation::Write(&[address | SPI_READ_FLAG]),
            embedded_hal_async::spi::Operation::Read(read_data),
        ];

        self.spi
            .transaction(&mut operations)
            .await
            .map_err(Error::Bus)
    }

    async fn write_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let mut buffer = [0u8; MAX_BURST + 1];
        buffer[0] = address & !SPI_READ_FLAG;
        let len = write_data.len().min(MAX_BURST);
        buffer[1..=len].copy_from_slice(&write_data[..len]);

        self.spi.write(&buffer[..=len]).await.map_err(Error::Bus)
    }
}
