//! S5PV210 CPU frequency table
//!
//! Static DVFS configuration for the S5PV210/S5PC110 application processor
//! the BMA023 ships alongside on the reference boards. Nothing here talks to
//! hardware; board code feeds these values to its own clock driver.

/// Pack APLL `M`, `P` and `S` divider values into the `APLL_CON` register layout
///
/// Bit 31 enables the PLL, `M` occupies bits 25:16, `P` bits 13:8 and `S`
/// bits 2:0.
#[must_use]
pub const fn apll_value(m: u32, p: u32, s: u32) -> u32 {
    (1 << 31) | (m << 16) | (p << 8) | s
}

/// APLL setting for 1664 MHz
pub const APLL_VAL_1664: u32 = apll_value(417, 3, 0);
/// APLL setting for 1520 MHz
pub const APLL_VAL_1520: u32 = apll_value(180, 3, 1);
/// APLL setting for 1332 MHz
pub const APLL_VAL_1332: u32 = apll_value(444, 4, 0);
/// APLL setting for 1320 MHz
pub const APLL_VAL_1320: u32 = apll_value(165, 3, 1);
/// APLL setting for 1200 MHz
pub const APLL_VAL_1200: u32 = apll_value(150, 3, 0);
/// APLL setting for 1096 MHz
pub const APLL_VAL_1096: u32 = apll_value(137, 3, 1);
/// APLL setting for 1000 MHz
pub const APLL_VAL_1000: u32 = apll_value(125, 3, 0);
/// APLL setting for 800 MHz
pub const APLL_VAL_800: u32 = apll_value(100, 3, 1);

/// Frequency used while entering sleep, in kHz
pub const SLEEP_FREQ_KHZ: u32 = 800 * 1000;
/// Sleep frequency on Venturi boards, in kHz
pub const SLEEP_FREQ_VENTURI_KHZ: u32 = 1096 * 1000;
/// Ultra-low-power frequency, in kHz
pub const ULP_FREQ_KHZ: u32 = 800 * 1000;

/// Relation flag: block further frequency changes
pub const DISABLE_FURTHER_CPUFREQ: u32 = 0x10;
/// Relation flag: allow further frequency changes
pub const ENABLE_FURTHER_CPUFREQ: u32 = 0x20;
/// Mask of the relation flags above; zero keeps the previous setting
pub const MASK_FURTHER_CPUFREQ: u32 = 0x30;

/// Performance level, fastest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PerfLevel {
    /// 1.52 GHz
    L0 = 0,
    /// 1.32 GHz
    L1 = 1,
    /// 1.096 GHz
    L2 = 2,
    /// 800 MHz
    L3 = 3,
    /// 400 MHz
    L4 = 4,
    /// 200 MHz
    L5 = 5,
}

/// Slowest performance level
pub const MAX_PERF_LEVEL: PerfLevel = PerfLevel::L5;

/// All levels, fastest first
pub const PERF_LEVELS: [PerfLevel; 6] = [
    PerfLevel::L0,
    PerfLevel::L1,
    PerfLevel::L2,
    PerfLevel::L3,
    PerfLevel::L4,
    PerfLevel::L5,
];

impl PerfLevel {
    /// Core clock in kHz
    #[must_use]
    pub const fn frequency_khz(self) -> u32 {
        match self {
            Self::L0 => 1_520_000,
            Self::L1 => 1_320_000,
            Self::L2 => 1_096_000,
            Self::L3 => 800_000,
            Self::L4 => 400_000,
            Self::L5 => 200_000,
        }
    }

    /// Fastest level not above `khz`, or `None` if `khz` is below every level
    #[must_use]
    pub fn at_most(khz: u32) -> Option<Self> {
        PERF_LEVELS
            .iter()
            .copied()
            .find(|level| level.frequency_khz() <= khz)
    }
}
