use crate::error::RegisterError;
use crate::registers::RegisterAddress;
use async_trait::async_trait;

/// Remote access to the heat-pump holding registers.
///
/// The real transport (Modbus over a serial bridge, a cloud API, ...)
/// lives outside this crate; actions only ever talk to this trait.
#[async_trait]
pub trait RegisterAccess: Send + Sync {
    /// Read one holding register as a signed value.
    async fn read(&self, addr: RegisterAddress) -> Result<i32, RegisterError>;

    /// Write a raw 16-bit word to a holding register.
    async fn write(&self, addr: RegisterAddress, raw: u16) -> Result<(), RegisterError>;

    /// Read a temperature register, scaled from tenths of a degree.
    async fn read_temperature(&self, addr: RegisterAddress) -> Result<f64, RegisterError> {
        Ok(f64::from(self.read(addr).await?) / 10.0)
    }

    /// Write a temperature and read back the value the controller
    /// actually accepted, which may be clamped to its supported range.
    async fn set_temperature(
        &self,
        addr: RegisterAddress,
        temperature: f64,
    ) -> Result<f64, RegisterError> {
        let raw = (temperature * 10.0).round() as i16 as u16;
        self.write(addr, raw).await?;
        self.read_temperature(addr).await
    }
}
