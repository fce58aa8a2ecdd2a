//! Unit tests for acceleration and temperature readout

use crate::common::{Operation, create_mock_driver};
use bma023::AccelData;
use bma023::registers::addr;

#[test]
fn test_axis_from_raw_registers() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_register(addr::X_AXIS_LSB, 0x40);
    interface.set_register(addr::X_AXIS_MSB, 0x02);

    assert_eq!(driver.read_accel_x().unwrap(), 9);
}

#[test]
fn test_new_data_flag_is_not_data() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_register(addr::X_AXIS_LSB, 0x41);
    interface.set_register(addr::X_AXIS_MSB, 0x02);

    assert_eq!(driver.read_accel_x().unwrap(), 9);
}

#[test]
fn test_single_axis_is_one_transaction() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_accel_data(1, -2, 3, false);

    assert_eq!(driver.read_accel_y().unwrap(), -2);
    assert_eq!(
        interface.operations(),
        vec![Operation::Read {
            address: addr::Y_AXIS_LSB,
            len: 2
        }]
    );
}

#[test]
fn test_read_xyz() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_accel_data(256, -100, -256, true);

    let data = driver.read_accel_xyz().unwrap();

    assert_eq!(
        data,
        AccelData {
            x: 256,
            y: -100,
            z: -256
        }
    );
    assert_eq!(
        interface.operations(),
        vec![Operation::Read {
            address: addr::X_AXIS_LSB,
            len: 6
        }]
    );
}

#[test]
fn test_axis_limits() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_accel_data(511, -512, -1, false);

    let (x, y, z) = driver.read_accel_xyz().unwrap().into();

    assert_eq!((x, y, z), (511, -512, -1));
    assert_eq!(driver.read_accel_z().unwrap(), -1);
}

#[test]
fn test_new_data_flags() {
    let (mut driver, interface) = create_mock_driver();

    interface.set_accel_data(0, 0, 0, false);
    assert_eq!(driver.new_data_flags().unwrap(), (false, false, false));

    interface.set_accel_data(0, 0, 0, true);
    interface.set_register(addr::Y_AXIS_LSB, 0x00);
    assert_eq!(driver.new_data_flags().unwrap(), (true, false, true));
}

#[test]
fn test_temperature() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_register(addr::TEMP_RD, 0x7A);

    assert_eq!(driver.read_temperature().unwrap(), 0x7A);
}
