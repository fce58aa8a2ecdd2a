//! Unit tests for raw register and field access

use crate::common::{Operation, create_mock_driver};
use bma023::Error;
use bma023::registers::{self, addr};

#[test]
fn test_chip_identification() {
    let (driver, _interface) = create_mock_driver();

    assert_eq!(driver.chip_id(), 0x02);
    assert_eq!(driver.ml_version(), 1);
    assert_eq!(driver.al_version(), 2);
}

#[test]
fn test_get_field_reads_one_register() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_register(addr::X_AXIS_MSB, 0x02);

    assert_eq!(driver.get_field(registers::ACC_X_MSB).unwrap(), 0x02);
    assert_eq!(
        interface.operations(),
        vec![Operation::Read {
            address: addr::X_AXIS_MSB,
            len: 1
        }]
    );
}

#[test]
fn test_set_field_is_read_then_write() {
    let (mut driver, interface) = create_mock_driver();

    driver.set_field(registers::RANGE, 2).unwrap();

    assert_eq!(
        interface.operations(),
        vec![
            Operation::Read {
                address: addr::RANGE_BWIDTH,
                len: 1
            },
            Operation::Write {
                address: addr::RANGE_BWIDTH,
                data: vec![0x10]
            },
        ]
    );
}

#[test]
fn test_set_field_preserves_other_bits() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_register(addr::RANGE_BWIDTH, 0xE7);

    driver.set_field(registers::RANGE, 2).unwrap();

    assert_eq!(interface.get_register(addr::RANGE_BWIDTH), 0xF7);
    assert_eq!(driver.get_field(registers::BANDWIDTH).unwrap(), 7);
}

#[test]
fn test_set_field_truncates_wide_values() {
    let (mut driver, interface) = create_mock_driver();

    driver.set_field(registers::LG_HYST, 0x0F).unwrap();

    assert_eq!(interface.get_register(addr::HYSTERESIS), 0x07);
}

#[test]
fn test_set_then_get_every_field() {
    for field in registers::FIELDS {
        let (mut driver, _interface) = create_mock_driver();
        let value = field.max_value() & 0xA5;

        driver.set_field(*field, value).unwrap();

        assert_eq!(
            driver.get_field(*field).unwrap(),
            value,
            "round trip failed for {}",
            field.name
        );
    }
}

#[test]
fn test_field_lookup_by_name() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_register(addr::CONF2, 0x80);

    let field = registers::field_by_name("SPI4").unwrap();
    assert_eq!(driver.get_field(field).unwrap(), 1);
    assert!(registers::field_by_name("WHO_AM_I").is_none());
}

#[test]
fn test_raw_register_access() {
    let (mut driver, interface) = create_mock_driver();

    driver.write_register(addr::CUSTOMER1, &[0x12, 0x34]).unwrap();

    let mut data = [0u8; 2];
    driver.read_register(addr::CUSTOMER1, &mut data).unwrap();
    assert_eq!(data, [0x12, 0x34]);
    assert_eq!(interface.read_count(), 1);
}

#[test]
fn test_customer_reserved_slots() {
    let (mut driver, interface) = create_mock_driver();

    driver.set_customer_reserved(1, 0xAB).unwrap();
    driver.set_customer_reserved(2, 0xCD).unwrap();

    assert_eq!(interface.get_register(addr::CUSTOMER1), 0xAB);
    assert_eq!(driver.customer_reserved(2).unwrap(), 0xCD);

    interface.clear_operations();
    assert!(matches!(
        driver.customer_reserved(3),
        Err(Error::OutOfRange)
    ));
    assert!(interface.operations().is_empty());
}
