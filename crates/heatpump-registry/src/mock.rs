use crate::error::RegisterError;
use crate::registers::{sign_extend, RegisterAddress};
use crate::traits::RegisterAccess;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory register bank for tests and demos.
///
/// Unset registers read as zero; writes are stored, so a write followed
/// by a read-back behaves like a controller that accepts every value.
#[derive(Debug, Default)]
pub struct MockRegisters {
    values: Mutex<HashMap<RegisterAddress, u16>>,
}

impl MockRegisters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset a register, builder style.
    pub fn with_value(self, addr: RegisterAddress, raw: u16) -> Self {
        self.set(addr, raw);
        self
    }

    pub fn set(&self, addr: RegisterAddress, raw: u16) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(addr, raw);
        }
    }

    pub fn get(&self, addr: RegisterAddress) -> Option<u16> {
        self.values.lock().ok().and_then(|v| v.get(&addr).copied())
    }
}

#[async_trait]
impl RegisterAccess for MockRegisters {
    async fn read(&self, addr: RegisterAddress) -> Result<i32, RegisterError> {
        let values = self
            .values
            .lock()
            .map_err(|_| RegisterError::Io("poisoned register bank".into()))?;
        Ok(sign_extend(values.get(&addr).copied().unwrap_or(0)))
    }

    async fn write(&self, addr: RegisterAddress, raw: u16) -> Result<(), RegisterError> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| RegisterError::Io("poisoned register bank".into()))?;
        values.insert(addr, raw);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_back_written_values() {
        let regs = MockRegisters::new();
        regs.write(RegisterAddress::SYSTEM_ON, 1).await.unwrap();
        assert_eq!(regs.read(RegisterAddress::SYSTEM_ON).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn unset_registers_read_zero() {
        let regs = MockRegisters::new();
        assert_eq!(regs.read(RegisterAddress::OUTSIDE_TEMP).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn temperatures_scale_from_tenths() {
        let regs = MockRegisters::new().with_value(RegisterAddress::OUTSIDE_TEMP, 255);
        let temp = regs
            .read_temperature(RegisterAddress::OUTSIDE_TEMP)
            .await
            .unwrap();
        assert!((temp - 25.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn set_temperature_round_trips() {
        let regs = MockRegisters::new();
        let actual = regs
            .set_temperature(RegisterAddress::DHW_TARGET_TEMP, 45.0)
            .await
            .unwrap();
        assert!((actual - 45.0).abs() < 1e-9);
        assert_eq!(regs.get(RegisterAddress::DHW_TARGET_TEMP), Some(450));
    }
}
