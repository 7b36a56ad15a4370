//! Template-to-action registry and dispatch.

use crate::actions::{DhwMode, HeatPumpAction, LoopMode, Regime};
use crate::error::RegistryError;
use crate::registers::HeatingLoop;
use crate::traits::RegisterAccess;
use command_matcher::{RecognizedAction, SlotValue};
use tracing::debug;

/// Slot name carrying the numeric value in parameterized templates.
const TEMPERATURE_SLOT: &str = "temperature";

/// Ordered mapping from command template to heat-pump action.
///
/// Built once at startup and injected wherever commands are dispatched.
/// The template strings double as the matcher catalog and as the
/// `action_id` keys resolved back here after recognition.
#[derive(Debug, Clone, Default)]
pub struct ActionRegistry {
    entries: Vec<(String, HeatPumpAction)>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one template. Templates whose fixed text collides with an
    /// earlier entry shadow it at match time, so keep fixed texts unique.
    pub fn register(&mut self, template: impl Into<String>, action: HeatPumpAction) {
        self.entries.push((template.into(), action));
    }

    /// Template strings in registration order, the matcher catalog.
    pub fn templates(&self) -> Vec<String> {
        self.entries.iter().map(|(t, _)| t.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the action registered for a recognized `action_id`.
    pub fn resolve(&self, action_id: &str) -> Option<HeatPumpAction> {
        self.entries
            .iter()
            .find(|(template, _)| template == action_id)
            .map(|(_, action)| *action)
    }

    /// Execute the action behind a recognition result.
    pub async fn dispatch(
        &self,
        recognized: &RecognizedAction,
        registers: &dyn RegisterAccess,
    ) -> Result<String, RegistryError> {
        let action = self
            .resolve(&recognized.action_id)
            .ok_or_else(|| RegistryError::UnknownAction(recognized.action_id.clone()))?;

        let parameter = recognized
            .parameters
            .get(TEMPERATURE_SLOT)
            .and_then(SlotValue::as_number)
            .map(|n| n as f64);

        if action.needs_parameter() && parameter.is_none() {
            return Err(RegistryError::MissingParameter {
                action: recognized.action_id.clone(),
                slot: TEMPERATURE_SLOT.to_string(),
            });
        }

        debug!(?action, ?parameter, "dispatching recognized command");
        action.execute(registers, parameter).await
    }

    /// The Slovene command set understood by the voice agent.
    pub fn slovene_default() -> Self {
        let mut registry = Self::new();

        registry.register("Ali je sistem vklopljen", HeatPumpAction::GetSystemStatus);
        registry.register("Ali je sistem izklopljen", HeatPumpAction::GetSystemStatus);
        registry.register("Kakšno je stanje sistema", HeatPumpAction::GetSystemStatus);

        registry.register("Vklopi sistem", HeatPumpAction::TurnSystemOn);
        registry.register(
            "Vklopi toplotno črpalko in ogrevalne kroge",
            HeatPumpAction::TurnSystemOn,
        );
        registry.register("Izklopi sistem", HeatPumpAction::TurnSystemOff);
        registry.register(
            "Izklopi toplotno črpalko in ogrevalne kroge",
            HeatPumpAction::TurnSystemOff,
        );

        registry.register("Kakšna funkcija se izvaja", HeatPumpAction::GetOperatingMode);
        registry.register(
            "Kakšna funkcija delovanja se izvaja",
            HeatPumpAction::GetOperatingMode,
        );
        registry.register(
            "Kakšen je trenuten režim delovanja",
            HeatPumpAction::GetOperationRegime,
        );
        registry.register("Kakšen je režim delovanja", HeatPumpAction::GetOperationRegime);
        registry.register("Kakšen je trenuten program", HeatPumpAction::GetProgramMode);
        registry.register("Kakšen je program delovanja", HeatPumpAction::GetProgramMode);

        registry.register(
            "Ali je rezervni vir vklopljen",
            HeatPumpAction::GetReserveSourceStatus,
        );
        registry.register(
            "Kakšen je status rezervnega vira",
            HeatPumpAction::GetReserveSourceStatus,
        );
        registry.register(
            "Ali je alternativni vir vklopljen",
            HeatPumpAction::GetAlternativeSourceStatus,
        );
        registry.register(
            "Kakšen je status alternativnega vira",
            HeatPumpAction::GetAlternativeSourceStatus,
        );
        registry.register(
            "Kakšen je status odtaljevanja",
            HeatPumpAction::GetDefrostStatus,
        );
        registry.register("Ali se odtaljevanje izvaja", HeatPumpAction::GetDefrostStatus);

        for (regime, name) in [
            (Regime::Normal, "normalen"),
            (Regime::Eco, "ECO"),
            (Regime::Com, "COM"),
        ] {
            registry.register(format!("Nastavi {name} režim"), HeatPumpAction::SetRegime(regime));
            registry.register(format!("Vklopi {name} režim"), HeatPumpAction::SetRegime(regime));
            registry.register(
                format!("Nastavi režim na {name} način"),
                HeatPumpAction::SetRegime(regime),
            );
        }

        registry.register(
            "Kakšna je trenutna obremenitev toplotne črpalke",
            HeatPumpAction::GetHeatPumpLoad,
        );
        registry.register("Kakšna je zunanja temperatura", HeatPumpAction::GetOutsideTemp);

        registry.register(
            "Nastavi temperaturo sanitarne vode na <temperature> stopinj",
            HeatPumpAction::SetDhwTargetTemp,
        );
        registry.register(
            "Nastavi želeno temperaturo sanitarne vode na <temperature> stopinj",
            HeatPumpAction::SetDhwTargetTemp,
        );
        registry.register(
            "Segrej sanitarno vodo na <temperature> stopinj",
            HeatPumpAction::SetDhwTargetTemp,
        );
        registry.register(
            "Kakšna je trenutna želena temperatura sanitarne vode",
            HeatPumpAction::GetDhwTargetTemp,
        );
        registry.register(
            "Kakšna je temperatura sanitarne vode",
            HeatPumpAction::GetDhwTemp,
        );
        registry.register(
            "Vklopi hitro segrevanje sanitarne vode",
            HeatPumpAction::EnableDhwQuickHeat,
        );
        registry.register(
            "Izklopi hitro segrevanje sanitarne vode",
            HeatPumpAction::DisableDhwQuickHeat,
        );
        registry.register(
            "Ali je hitro segrevanje sanitarne vode vklopljeno",
            HeatPumpAction::GetDhwQuickHeatStatus,
        );
        registry.register(
            "Kakšen je status hitrega segrevanja sanitarne vode",
            HeatPumpAction::GetDhwQuickHeatStatus,
        );
        registry.register(
            "Izklopi segrevanje sanitarne vode",
            HeatPumpAction::SetDhwMode(DhwMode::Disabled),
        );
        registry.register(
            "Nastavi normalen režim sanitarne vode",
            HeatPumpAction::SetDhwMode(DhwMode::Normal),
        );
        registry.register(
            "Nastavi režim sanitarne vode po urniku",
            HeatPumpAction::SetDhwMode(DhwMode::Schedule),
        );
        registry.register(
            "Kakšen je trenuten način delovanja sanitarne vode po urniku",
            HeatPumpAction::GetDhwScheduleMode,
        );

        for lp in HeatingLoop::ALL {
            let numeral = lp.numeral();
            let genitive = lp.ordinal_genitive();
            let ordinal = lp.ordinal();
            let locative = lp.ordinal_locative();

            registry.register(
                format!("Nastavi temperaturo prostora {numeral} na <temperature> stopinj"),
                HeatPumpAction::SetLoopRoomTargetTemp(lp),
            );
            registry.register(
                format!("Nastavi želeno temperaturo prostora {genitive} kroga na <temperature> stopinj"),
                HeatPumpAction::SetLoopRoomTargetTemp(lp),
            );
            registry.register(
                format!("Kakšna je trenutna želena temperatura prostora {numeral}"),
                HeatPumpAction::GetLoopRoomTargetTemp(lp),
            );
            registry.register(
                format!("Kakšna je trenutna želena temperatura prostora {genitive} kroga"),
                HeatPumpAction::GetLoopRoomTargetTemp(lp),
            );
            registry.register(
                format!("Izklopi {ordinal} ogrevalni krog"),
                HeatPumpAction::SetLoopMode(lp, LoopMode::Disabled),
            );
            registry.register(
                format!("Izklopi ogrevalni krog {numeral}"),
                HeatPumpAction::SetLoopMode(lp, LoopMode::Disabled),
            );
            registry.register(
                format!("Nastavi delovanje {genitive} ogrevalnega kroga na normalni režim"),
                HeatPumpAction::SetLoopMode(lp, LoopMode::Normal),
            );
            registry.register(
                format!("Vklopi normalni režim na {locative} ogrevalnem krogu"),
                HeatPumpAction::SetLoopMode(lp, LoopMode::Normal),
            );
            registry.register(
                format!("Nastavi delovanje {genitive} ogrevalnega kroga na delovanje po urniku"),
                HeatPumpAction::SetLoopMode(lp, LoopMode::Schedule),
            );
            registry.register(
                format!("Vklopi delovanje po urniku na {locative} ogrevalnem krogu"),
                HeatPumpAction::SetLoopMode(lp, LoopMode::Schedule),
            );
            registry.register(
                format!("Kakšen je status delovanja {genitive} ogrevalnega kroga"),
                HeatPumpAction::GetLoopMode(lp),
            );
            registry.register(
                format!("Kakšna je temperatura {genitive} ogrevalnega kroga"),
                HeatPumpAction::GetLoopTemp(lp),
            );
        }

        registry
    }
}

#[cfg(all(test, feature = "mock"))]
mod tests {
    use super::*;
    use crate::mock::MockRegisters;
    use crate::registers::RegisterAddress;
    use command_matcher::CommandMatcher;
    use std::collections::HashMap;

    #[test]
    fn default_catalog_compiles_into_a_matcher() {
        let registry = ActionRegistry::slovene_default();
        assert!(!registry.is_empty());
        let matcher = CommandMatcher::new(registry.templates()).expect("catalog compiles");
        assert_eq!(matcher.len(), registry.len());
    }

    #[test]
    fn default_catalog_fixed_texts_are_unique() {
        use command_matcher::CommandTemplate;
        let registry = ActionRegistry::slovene_default();
        let mut seen = std::collections::HashSet::new();
        for template in registry.templates() {
            let compiled = CommandTemplate::compile(&template).expect("compiles");
            assert!(
                seen.insert(compiled.fixed_text.clone()),
                "fixed text collision: '{}'",
                compiled.fixed_text
            );
        }
    }

    #[tokio::test]
    async fn recognized_command_dispatches_to_the_pump() {
        let registry = ActionRegistry::slovene_default();
        let matcher = CommandMatcher::new(registry.templates()).expect("catalog compiles");
        let regs = MockRegisters::new();

        let recognized = matcher.recognize("vklopi sistem").expect("recognized");
        let response = registry.dispatch(&recognized, &regs).await.expect("dispatched");
        assert_eq!(response, "Vklop sistema uspešen.");
        assert_eq!(regs.get(RegisterAddress::SYSTEM_ON), Some(1));
    }

    #[tokio::test]
    async fn spoken_temperature_reaches_the_register() {
        let registry = ActionRegistry::slovene_default();
        let matcher = CommandMatcher::new(registry.templates()).expect("catalog compiles");
        let regs = MockRegisters::new();

        let recognized = matcher
            .recognize("nastavi temperaturo sanitarne vode na petinštirideset stopinj")
            .expect("recognized");
        assert_eq!(
            recognized.action_id,
            "Nastavi temperaturo sanitarne vode na <temperature> stopinj"
        );

        let response = registry.dispatch(&recognized, &regs).await.expect("dispatched");
        assert_eq!(
            response,
            "Želena temperatura sanitarne vode nastavljena na 45 stopinj."
        );
        assert_eq!(regs.get(RegisterAddress::DHW_TARGET_TEMP), Some(450));
    }

    #[tokio::test]
    async fn loop_temperature_command_addresses_the_right_loop() {
        let registry = ActionRegistry::slovene_default();
        let matcher = CommandMatcher::new(registry.templates()).expect("catalog compiles");
        let regs = MockRegisters::new();

        let recognized = matcher
            .recognize("nastavi temperaturo prostora ena na dvaindvajset stopinj")
            .expect("recognized");
        let response = registry.dispatch(&recognized, &regs).await.expect("dispatched");
        assert_eq!(
            response,
            "Želena temperatura prostora prvega kroga nastavljena na 22 stopinj."
        );
        assert_eq!(regs.get(HeatingLoop::One.target_room_temp()), Some(220));
    }

    #[tokio::test]
    async fn unknown_action_id_is_rejected() {
        let registry = ActionRegistry::slovene_default();
        let regs = MockRegisters::new();
        let recognized = RecognizedAction {
            action_id: "Naredi kavo".to_string(),
            parameters: HashMap::new(),
        };
        let err = registry.dispatch(&recognized, &regs).await.unwrap_err();
        assert_eq!(err, RegistryError::UnknownAction("Naredi kavo".to_string()));
    }

    #[tokio::test]
    async fn set_action_without_numeric_slot_is_rejected() {
        let registry = ActionRegistry::slovene_default();
        let regs = MockRegisters::new();
        let mut parameters = HashMap::new();
        parameters.insert(
            "temperature".to_string(),
            SlotValue::Text("zelo toplo".to_string()),
        );
        let recognized = RecognizedAction {
            action_id: "Segrej sanitarno vodo na <temperature> stopinj".to_string(),
            parameters,
        };
        let err = registry.dispatch(&recognized, &regs).await.unwrap_err();
        assert!(matches!(err, RegistryError::MissingParameter { .. }));
    }
}
