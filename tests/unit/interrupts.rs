//! Unit tests for interrupt configuration and status

use crate::common::create_mock_driver;
use bma023::InterruptMask;
use bma023::registers::addr;

#[test]
fn test_interrupt_status_decode() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_register(addr::STATUS, 0x81 | 0x08);

    let status = driver.interrupt_status().unwrap();

    assert!(status.high_g);
    assert!(!status.low_g);
    assert!(status.low_g_latched);
    assert!(!status.alert);
    assert!(status.selftest_result);
    assert!(status.any_event());
}

#[test]
fn test_interrupt_mask_writes_conf1_then_conf2() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_register(addr::CONF1, 0x0C);
    interface.set_register(addr::CONF2, 0x80);

    let mask = InterruptMask {
        low_g: true,
        high_g: true,
        new_data: true,
        latch: true,
        ..Default::default()
    };
    driver.set_interrupt_mask(mask).unwrap();

    assert_eq!(
        interface.writes(),
        vec![(addr::CONF1, vec![0x0F]), (addr::CONF2, vec![0xB0])]
    );
    assert_eq!(driver.interrupt_mask().unwrap(), mask);
}

#[test]
fn test_interrupt_mask_clears_unlisted_sources() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_register(addr::CONF1, 0xCF);
    interface.set_register(addr::CONF2, 0xF9);

    driver.set_interrupt_mask(InterruptMask::default()).unwrap();

    // Non-interrupt bits survive
    assert_eq!(interface.get_register(addr::CONF1), 0x0C);
    assert_eq!(interface.get_register(addr::CONF2), 0x89);
}

#[test]
fn test_single_source_setters() {
    let (mut driver, interface) = create_mock_driver();

    driver.set_low_g_int(true).unwrap();
    driver.set_high_g_int(true).unwrap();
    driver.set_any_motion_int(true).unwrap();
    driver.set_alert_int(true).unwrap();
    assert_eq!(interface.get_register(addr::CONF1), 0xC3);

    driver.set_advanced_int(true).unwrap();
    driver.set_new_data_int(true).unwrap();
    driver.set_latch_int(true).unwrap();
    assert_eq!(interface.get_register(addr::CONF2), 0x70);

    driver.set_high_g_int(false).unwrap();
    driver.set_latch_int(false).unwrap();

    let mask = driver.interrupt_mask().unwrap();
    assert!(mask.low_g && !mask.high_g && mask.any_motion && mask.alert);
    assert!(mask.advanced && mask.new_data && !mask.latch);
}

#[test]
fn test_reset_interrupt_keeps_control_bits() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_register(addr::CTRL, 0x01);

    driver.reset_interrupt().unwrap();

    assert_eq!(interface.get_register(addr::CTRL), 0x41);
}
