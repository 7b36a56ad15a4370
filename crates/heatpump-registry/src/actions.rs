//! Heat-pump operations and their Slovene responses.

use crate::error::RegistryError;
use crate::registers::{HeatingLoop, RegisterAddress};
use crate::traits::RegisterAccess;
use serde::{Deserialize, Serialize};

/// General operating regime selected by voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Regime {
    Normal,
    Eco,
    Com,
}

impl Regime {
    fn select_value(self) -> u16 {
        match self {
            Self::Normal => 0,
            Self::Eco => 1,
            Self::Com => 2,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Normal => "normalni",
            Self::Eco => "ECO",
            Self::Com => "COM",
        }
    }
}

/// Domestic hot water operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DhwMode {
    Disabled,
    Normal,
    Schedule,
}

impl DhwMode {
    fn select_value(self) -> u16 {
        match self {
            Self::Disabled => 0,
            Self::Normal => 1,
            Self::Schedule => 2,
        }
    }
}

/// Heating-loop operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoopMode {
    Disabled,
    Normal,
    Schedule,
}

impl LoopMode {
    fn select_value(self) -> u16 {
        match self {
            Self::Disabled => 0,
            Self::Normal => 1,
            Self::Schedule => 2,
        }
    }
}

impl HeatingLoop {
    /// "ena" .. "štiri", the spoken loop number.
    pub fn numeral(self) -> &'static str {
        match self {
            Self::One => "ena",
            Self::Two => "dva",
            Self::Three => "tri",
            Self::Four => "štiri",
        }
    }

    /// "prvi" .. "četrti".
    pub fn ordinal(self) -> &'static str {
        match self {
            Self::One => "prvi",
            Self::Two => "drugi",
            Self::Three => "tretji",
            Self::Four => "četrti",
        }
    }

    /// "prvega" .. "četrtega", the genitive used in responses.
    pub fn ordinal_genitive(self) -> &'static str {
        match self {
            Self::One => "prvega",
            Self::Two => "drugega",
            Self::Three => "tretjega",
            Self::Four => "četrtega",
        }
    }

    /// "prvem" .. "četrtem", the locative used after "na ... krogu".
    pub fn ordinal_locative(self) -> &'static str {
        match self {
            Self::One => "prvem",
            Self::Two => "drugem",
            Self::Three => "tretjem",
            Self::Four => "četrtem",
        }
    }
}

/// An operation the voice agent can run on the pump.
///
/// Executing an action reads or writes the relevant registers and
/// returns the Slovene sentence spoken back to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeatPumpAction {
    GetSystemStatus,
    TurnSystemOn,
    TurnSystemOff,
    GetOperatingMode,
    GetOperationRegime,
    SetRegime(Regime),
    GetProgramMode,
    GetReserveSourceStatus,
    GetAlternativeSourceStatus,
    GetDefrostStatus,
    GetHeatPumpLoad,
    GetOutsideTemp,
    SetDhwTargetTemp,
    GetDhwTargetTemp,
    GetDhwTemp,
    EnableDhwQuickHeat,
    DisableDhwQuickHeat,
    GetDhwQuickHeatStatus,
    SetDhwMode(DhwMode),
    GetDhwScheduleMode,
    SetLoopRoomTargetTemp(HeatingLoop),
    GetLoopRoomTargetTemp(HeatingLoop),
    SetLoopMode(HeatingLoop, LoopMode),
    GetLoopMode(HeatingLoop),
    GetLoopTemp(HeatingLoop),
}

impl HeatPumpAction {
    /// Whether this action consumes the numeric slot of its template.
    pub fn needs_parameter(self) -> bool {
        matches!(self, Self::SetDhwTargetTemp | Self::SetLoopRoomTargetTemp(_))
    }

    /// Execute against the injected register transport.
    pub async fn execute(
        self,
        registers: &dyn RegisterAccess,
        parameter: Option<f64>,
    ) -> Result<String, RegistryError> {
        match self {
            Self::GetSystemStatus => {
                let status = registers.read(RegisterAddress::SYSTEM_STATUS).await?;
                Ok(if status == 1 {
                    "Sistem je vklopljen.".to_string()
                } else {
                    "Sistem je izklopljen.".to_string()
                })
            }
            Self::TurnSystemOn => {
                registers.write(RegisterAddress::SYSTEM_ON, 1).await?;
                Ok("Vklop sistema uspešen.".to_string())
            }
            Self::TurnSystemOff => {
                registers.write(RegisterAddress::SYSTEM_ON, 0).await?;
                Ok("Izklop sistema uspešen.".to_string())
            }
            Self::GetOperatingMode => {
                let tag = registers.read(RegisterAddress::OPERATING_MODE).await?;
                let mode = match tag {
                    0 => "Ogrevanje",
                    1 => "Sanitarna voda",
                    2 => "Hlajenje",
                    3 => "Ogrevanje bazena",
                    4 => "Pregrevanje sanitarne vode",
                    5 => "Mirovanje",
                    7 => "Daljinski izklop",
                    _ => "Neznano",
                };
                Ok(format!("Funkcija, ki se izvaja: {mode}."))
            }
            Self::GetOperationRegime => {
                let tag = registers.read(RegisterAddress::OPERATING_REGIME).await?;
                let regime = match tag {
                    0 => "Hlajenje",
                    1 => "Ogrevanje",
                    2 => "Ogrevanje in hlajenje izklopljeno",
                    _ => "Neznan",
                };
                Ok(format!("Trenutno aktiven režim: {regime}."))
            }
            Self::SetRegime(regime) => {
                registers
                    .write(RegisterAddress::PROGRAM_SELECT, regime.select_value())
                    .await?;
                Ok(format!(
                    "Generalni režim nastavljen na {} način.",
                    regime.label()
                ))
            }
            Self::GetProgramMode => {
                let tag = registers.read(RegisterAddress::PROGRAM_MODE).await?;
                let program = match tag {
                    0 => "Normalno delovanje",
                    1 => "Generalno delovanje v ECO režimu",
                    2 => "Generalno delovanje v COM režimu",
                    3 => "Program sušenja estrihov",
                    _ => "Neznan",
                };
                Ok(format!(
                    "Trenutno aktiven dodaten program delovanja: {program}."
                ))
            }
            Self::GetReserveSourceStatus => {
                let status = registers.read(RegisterAddress::RESERVE_SOURCE).await?;
                Ok(if status == 1 {
                    "Rezervni vir je vklopljen.".to_string()
                } else {
                    "Rezervni vir je izklopljen.".to_string()
                })
            }
            Self::GetAlternativeSourceStatus => {
                let status = registers.read(RegisterAddress::ALTERNATIVE_SOURCE).await?;
                Ok(if status == 1 {
                    "Alternativni vir je vklopljen.".to_string()
                } else {
                    "Alternativni vir je izklopljen.".to_string()
                })
            }
            Self::GetDefrostStatus => {
                let status = registers.read(RegisterAddress::DEFROST_MODE).await?;
                Ok(if status == 1 {
                    "Trenutno se izvaja odtaljevanje.".to_string()
                } else {
                    "Trenutno se odtaljevanje ne izvaja.".to_string()
                })
            }
            Self::GetHeatPumpLoad => {
                let load = registers.read(RegisterAddress::CURRENT_HP_LOAD).await?;
                Ok(format!(
                    "Trenutna obremenjenost toplotne črpalke: {load} procentov."
                ))
            }
            Self::GetOutsideTemp => {
                let temp = registers
                    .read_temperature(RegisterAddress::OUTSIDE_TEMP)
                    .await?;
                Ok(format!(
                    "Trenutna zunanja temperatura je {}.",
                    degrees_nominative(temp)
                ))
            }
            Self::SetDhwTargetTemp => {
                let requested = required_parameter(self, parameter)?;
                let actual = registers
                    .set_temperature(RegisterAddress::DHW_TARGET_TEMP, requested)
                    .await?;
                Ok(set_temperature_response(
                    requested,
                    actual,
                    "sanitarno vodo",
                    "Želena temperatura sanitarne vode",
                ))
            }
            Self::GetDhwTargetTemp => {
                let temp = registers
                    .read_temperature(RegisterAddress::DHW_CURRENT_TARGET_TEMP)
                    .await?;
                // the controller reports raw 5000 when DHW heating is off
                if (temp - 500.0).abs() < f64::EPSILON {
                    return Ok("Sanitarna voda je izklopljena.".to_string());
                }
                Ok(format!(
                    "Trenutna želena temperatura sanitarne vode je {}.",
                    degrees_nominative(temp)
                ))
            }
            Self::GetDhwTemp => {
                let temp = registers
                    .read_temperature(RegisterAddress::DHW_TEMP)
                    .await?;
                Ok(format!(
                    "Trenutna temperatura sanitarne vode je {}.",
                    degrees_nominative(temp)
                ))
            }
            Self::EnableDhwQuickHeat => {
                registers
                    .write(RegisterAddress::DHW_QUICK_HEAT_ENABLE, 1)
                    .await?;
                Ok("Vklopljeno hitro segrevanje sanitarne vode.".to_string())
            }
            Self::DisableDhwQuickHeat => {
                registers
                    .write(RegisterAddress::DHW_QUICK_HEAT_ENABLE, 0)
                    .await?;
                Ok("Izklopljeno hitro segrevanje sanitarne vode.".to_string())
            }
            Self::GetDhwQuickHeatStatus => {
                let status = registers.read(RegisterAddress::DHW_QUICK_HEAT).await?;
                Ok(if status == 1 {
                    "Hitro segrevanje sanitarne vode je vklopljeno.".to_string()
                } else {
                    "Hitro segrevanje sanitarne vode je izklopljeno.".to_string()
                })
            }
            Self::SetDhwMode(mode) => {
                registers
                    .write(RegisterAddress::DHW_MODE_SELECT, mode.select_value())
                    .await?;
                Ok(match mode {
                    DhwMode::Disabled => "Delovanje sanitarne vode izklopljeno.".to_string(),
                    DhwMode::Normal => {
                        "Nastavljeno delovanje sanitarne vode na normalni režim.".to_string()
                    }
                    DhwMode::Schedule => {
                        "Nastavljeno delovanje sanitarne vode na delovanje po urniku.".to_string()
                    }
                })
            }
            Self::GetDhwScheduleMode => {
                let tag = registers.read(RegisterAddress::DHW_SCHEDULE_STATUS).await?;
                Ok(format!(
                    "Trenuten način delovanja sanitarne vode po urniku: {}.",
                    schedule_mode_label(tag)
                ))
            }
            Self::SetLoopRoomTargetTemp(lp) => {
                let requested = required_parameter(self, parameter)?;
                let actual = registers
                    .set_temperature(lp.target_room_temp(), requested)
                    .await?;
                Ok(set_temperature_response(
                    requested,
                    actual,
                    &format!("prostor {} kroga", lp.ordinal_genitive()),
                    &format!("Želena temperatura prostora {} kroga", lp.ordinal_genitive()),
                ))
            }
            Self::GetLoopRoomTargetTemp(lp) => {
                let temp = registers
                    .read_temperature(lp.current_target_room_temp())
                    .await?;
                Ok(format!(
                    "Trenutna želena temperatura prostora {} ogrevalnega kroga je {}.",
                    lp.ordinal_genitive(),
                    degrees_nominative(temp)
                ))
            }
            Self::SetLoopMode(lp, mode) => {
                registers
                    .write(lp.mode_select(), mode.select_value())
                    .await?;
                Ok(match mode {
                    LoopMode::Disabled => {
                        let ordinal = lp.ordinal();
                        let capitalized = capitalize(ordinal);
                        format!("{capitalized} ogrevalni krog izklopljen.")
                    }
                    LoopMode::Normal => format!(
                        "Delovanje {} ogrevalnega kroga nastavljeno na normalni režim.",
                        lp.ordinal_genitive()
                    ),
                    LoopMode::Schedule => format!(
                        "Delovanje {} ogrevalnega kroga nastavljeno na delovanje po urniku.",
                        lp.ordinal_genitive()
                    ),
                })
            }
            Self::GetLoopMode(lp) => {
                let tag = registers.read(lp.schedule_status()).await?;
                Ok(format!(
                    "Trenutni status delovanja {} kroga po urniku: {}.",
                    lp.ordinal_genitive(),
                    schedule_mode_label(tag)
                ))
            }
            Self::GetLoopTemp(lp) => {
                let temp = registers.read_temperature(lp.temp_sensor()).await?;
                Ok(format!(
                    "Trenutna temperatura {} ogrevalnega kroga: {}.",
                    lp.ordinal_genitive(),
                    degrees_nominative(temp)
                ))
            }
        }
    }
}

fn required_parameter(
    action: HeatPumpAction,
    parameter: Option<f64>,
) -> Result<f64, RegistryError> {
    parameter.ok_or_else(|| RegistryError::MissingParameter {
        action: format!("{action:?}"),
        slot: "temperature".to_string(),
    })
}

/// Response for a set-temperature action, warning when the controller
/// clamped the requested value to its supported range.
fn set_temperature_response(
    requested: f64,
    actual: f64,
    target_accusative: &str,
    subject: &str,
) -> String {
    let confirmation = format!(
        "{subject} nastavljena na {}.",
        degrees_accusative(actual)
    );
    if actual < requested {
        format!(
            "Izbrana temperatura {} je previsoka. Najvišja podprta temperatura za {} je {}. {}",
            degrees_nominative(requested),
            target_accusative,
            degrees_nominative(actual),
            confirmation
        )
    } else if actual > requested {
        format!(
            "Izbrana temperatura {} je prenizka. Najnižja podprta temperatura za {} je {}. {}",
            degrees_nominative(requested),
            target_accusative,
            degrees_nominative(actual),
            confirmation
        )
    } else {
        confirmation
    }
}

fn schedule_mode_label(tag: i32) -> &'static str {
    match tag {
        0 => "Izklopljeno",
        1 => "Normalno",
        2 => "ECO",
        3 => "COM",
        _ => "Neznano",
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Degrees in the nominative case: "ena stopinja", "15 stopinj".
pub fn degrees_nominative(deg: f64) -> String {
    match (deg * 10.0).round() as i64 {
        10 => "ena stopinja".to_string(),
        20 => "dve stopinji".to_string(),
        30 => "tri stopinje".to_string(),
        40 => "štiri stopinje".to_string(),
        tenths if tenths % 10 == 0 => format!("{} stopinj", tenths / 10),
        _ => format!("{deg:.1} stopinj"),
    }
}

/// Degrees in the accusative case: "eno stopinjo", "15 stopinj".
pub fn degrees_accusative(deg: f64) -> String {
    match (deg * 10.0).round() as i64 {
        10 => "eno stopinjo".to_string(),
        20 => "dve stopinji".to_string(),
        30 => "tri stopinje".to_string(),
        40 => "štiri stopinje".to_string(),
        tenths if tenths % 10 == 0 => format!("{} stopinj", tenths / 10),
        _ => format!("{deg:.1} stopinj"),
    }
}
