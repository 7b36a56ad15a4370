//! Heat-pump controller holding registers.

use serde::{Deserialize, Serialize};

/// Modbus holding-register address, 1-based as printed in the vendor
/// register map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegisterAddress(pub u16);

impl RegisterAddress {
    pub const SYSTEM_ON: Self = Self(2000);
    pub const SYSTEM_STATUS: Self = Self(2001);
    pub const OPERATING_MODE: Self = Self(2002);
    pub const OPERATING_REGIME: Self = Self(2003);
    pub const PROGRAM_SELECT: Self = Self(2004);
    pub const PROGRAM_MODE: Self = Self(2005);
    pub const RESERVE_SOURCE: Self = Self(2006);
    pub const ALTERNATIVE_SOURCE: Self = Self(2007);
    pub const DEFROST_MODE: Self = Self(2008);
    pub const CURRENT_HP_LOAD: Self = Self(2009);
    pub const OUTSIDE_TEMP: Self = Self(2010);

    pub const DHW_TARGET_TEMP: Self = Self(2023);
    pub const DHW_CURRENT_TARGET_TEMP: Self = Self(2024);
    pub const DHW_MODE_SELECT: Self = Self(2025);
    pub const DHW_SCHEDULE_STATUS: Self = Self(2026);
    pub const DHW_TEMP: Self = Self(2027);
    pub const DHW_QUICK_HEAT: Self = Self(2028);
    pub const DHW_QUICK_HEAT_ENABLE: Self = Self(2029);

    pub fn to_int(self) -> u16 {
        self.0
    }
}

/// One of the four heating loops of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeatingLoop {
    One,
    Two,
    Three,
    Four,
}

impl HeatingLoop {
    pub const ALL: [Self; 4] = [Self::One, Self::Two, Self::Three, Self::Four];

    pub fn index(self) -> u16 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
        }
    }

    /// Loop register blocks start at 2100 and repeat every 20 registers.
    fn base(self) -> u16 {
        2100 + (self.index() - 1) * 20
    }

    pub fn target_room_temp(self) -> RegisterAddress {
        RegisterAddress(self.base())
    }

    pub fn current_target_room_temp(self) -> RegisterAddress {
        RegisterAddress(self.base() + 1)
    }

    pub fn mode_select(self) -> RegisterAddress {
        RegisterAddress(self.base() + 2)
    }

    pub fn schedule_status(self) -> RegisterAddress {
        RegisterAddress(self.base() + 3)
    }

    pub fn temp_sensor(self) -> RegisterAddress {
        RegisterAddress(self.base() + 4)
    }
}

/// Sign-extend a raw 16-bit register word to a signed value.
pub fn sign_extend(raw: u16) -> i32 {
    i32::from(raw as i16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_extension() {
        assert_eq!(sign_extend(0), 0);
        assert_eq!(sign_extend(255), 255);
        assert_eq!(sign_extend(0xFFFF), -1);
        assert_eq!(sign_extend(0xFF6A), -150); // -15.0 degrees in tenths
    }

    #[test]
    fn loop_blocks_do_not_overlap() {
        let mut seen = std::collections::HashSet::new();
        for lp in HeatingLoop::ALL {
            for addr in [
                lp.target_room_temp(),
                lp.current_target_room_temp(),
                lp.mode_select(),
                lp.schedule_status(),
                lp.temp_sensor(),
            ] {
                assert!(seen.insert(addr), "duplicate register {addr:?}");
            }
        }
    }
}
