//! End-to-end intake flows driven through the public library API.

use numport::replay;
use numport::wizard::{
    Callback, DeliveryData, DeliveryMethod, Direction, Dispatcher, NumberData, SimData, SimType,
    Stage, StageAction, StepController, StepData, VerificationMethod, WizardError, WizardState,
};

fn number() -> StepData {
    StepData::with_number(NumberData {
        phone: "0991234567".to_string(),
        verification_method: VerificationMethod::Sms,
    })
}

fn sim(sim_type: SimType) -> StepData {
    StepData::with_sim(SimData::new(sim_type))
}

fn courier() -> StepData {
    StepData::with_delivery(DeliveryData {
        method: DeliveryMethod::Courier,
        first_name: "Taras".to_string(),
        last_name: "Shevchenko".to_string(),
        nova_poshta_data: None,
    })
}

/// Session parked on the SIM stage
fn at_sim_stage() -> WizardState {
    let mut state = WizardState::new();
    state.advance_with(number()).unwrap();
    state.advance_with(StepData::with_tariff("red_m")).unwrap();
    assert_eq!(state.current(), Stage::Sim);
    state
}

#[test]
fn test_non_branching_stages_advance_by_one() {
    let submissions = [
        StepData::default(),
        number(),
        StepData::with_tariff("red_s"),
        sim(SimType::Esim),
        courier(),
    ];
    for stage in [Stage::Number, Stage::Tariff, Stage::Delivery] {
        for submission in &submissions {
            assert_eq!(
                StepController::advance(stage, submission).unwrap().index(),
                stage.index() + 1
            );
        }
    }
}

#[test]
fn test_sim_stage_branches_on_esim_flag() {
    assert_eq!(
        StepController::advance(Stage::Sim, &sim(SimType::Physical)).unwrap(),
        Stage::Delivery
    );
    assert_eq!(
        StepController::advance(Stage::Sim, &sim(SimType::Esim)).unwrap(),
        Stage::Status
    );
}

#[test]
fn test_retreat_from_status_always_lands_on_delivery() {
    for sim_type in [SimType::Physical, SimType::Esim] {
        let mut state = at_sim_stage();
        state.advance_with(sim(sim_type)).unwrap();
        if state.current() == Stage::Delivery {
            state.advance_with(courier()).unwrap();
        }
        assert_eq!(state.current(), Stage::Status);

        state.retreat_one().unwrap();
        assert_eq!(state.current(), Stage::Delivery);
    }
}

#[test]
fn test_merge_keeps_both_keys() {
    let tariff = StepData::with_tariff("A");
    let chosen_sim = sim(SimType::Physical);

    let record = StepData::default()
        .merged(tariff.clone())
        .merged(chosen_sim.clone());
    assert_eq!(record.tariff, tariff.tariff);
    assert_eq!(record.sim, chosen_sim.sim);
    assert_eq!(record.keys(), vec!["tariff", "sim"]);
}

#[test]
fn test_repeated_merge_is_idempotent() {
    let base = number().merged(StepData::with_tariff("red_l"));
    let once = base.clone().merged(sim(SimType::Esim));
    let twice = once.clone().merged(sim(SimType::Esim));
    assert_eq!(once, twice);
}

#[test]
fn test_scenario_number_submission() {
    let mut state = WizardState::new();
    let submission: StepData = serde_json::from_str(
        r#"{"number": {"phone": "0991234567", "verificationMethod": "sms"}}"#,
    )
    .unwrap();

    state.advance_with(submission).unwrap();
    assert_eq!(state.current().index(), 2);
    assert_eq!(state.record().number, number().number);
}

#[test]
fn test_scenario_physical_sim_visits_delivery() {
    let mut state = at_sim_stage();
    let submission: StepData =
        serde_json::from_str(r#"{"sim": {"type": "physical", "isESim": false}}"#).unwrap();

    let transition = state.advance_with(submission).unwrap();
    assert!(!transition.skipped);
    assert_eq!(state.current().index(), 4);
}

#[test]
fn test_scenario_esim_skips_delivery_and_back_returns_to_it() {
    let mut state = at_sim_stage();
    let submission: StepData =
        serde_json::from_str(r#"{"sim": {"type": "esim", "isESim": true}}"#).unwrap();

    let transition = state.advance_with(submission).unwrap();
    assert!(transition.skipped);
    assert_eq!(state.current().index(), 5);
    assert!(state.record().delivery.is_none());

    let before = state.record().clone();
    let transition = state.retreat_one().unwrap();
    assert_eq!(transition.direction, Direction::Backward);
    assert_eq!(state.current().index(), 4);
    assert_eq!(state.record(), &before);
    assert!(state.record().delivery.is_none());
}

#[test]
fn test_misuse_leaves_state_untouched() {
    let mut state = WizardState::new();
    assert!(matches!(
        state.retreat_one(),
        Err(WizardError::NoPreviousStage(Stage::Number))
    ));
    assert_eq!(state, WizardState::new());

    let mut state = at_sim_stage();
    state.advance_with(sim(SimType::Esim)).unwrap();
    let before = state.record().clone();
    assert!(matches!(
        state.advance_with(courier()),
        Err(WizardError::TerminalStage(Stage::Status))
    ));
    assert_eq!(state.current(), Stage::Status);
    assert_eq!(state.record(), &before);
}

#[test]
fn test_dispatcher_exposes_record_only_to_status() {
    let mut dispatcher = Dispatcher::headless();
    assert!(dispatcher.contract().record.is_none());

    for action in [
        StageAction::Next(number()),
        StageAction::Next(StepData::with_tariff("red_s")),
        StageAction::Next(sim(SimType::Esim)),
    ] {
        dispatcher.dispatch(action).unwrap();
    }

    let contract = dispatcher.contract();
    assert_eq!(contract.stage, Stage::Status);
    assert!(!contract.on_next);
    assert!(contract.on_back);
    assert_eq!(contract.record.map(StepData::keys), Some(vec!["number", "tariff", "sim"]));
}

#[test]
fn test_dispatcher_rejects_next_on_status() {
    let mut dispatcher = Dispatcher::headless();
    for action in [
        StageAction::Next(number()),
        StageAction::Next(StepData::with_tariff("red_s")),
        StageAction::Next(sim(SimType::Esim)),
    ] {
        dispatcher.dispatch(action).unwrap();
    }

    let err = dispatcher
        .dispatch(StageAction::Next(courier()))
        .unwrap_err();
    assert!(matches!(
        err,
        WizardError::CallbackNotOffered {
            stage: Stage::Status,
            callback: Callback::Next
        }
    ));
    assert!(dispatcher.record().delivery.is_none());
}

#[test]
fn test_replay_full_physical_flow() {
    let script = r#"[
        {"next": {"number": {"phone": "0501112233", "verificationMethod": "call"}}},
        {"next": {"tariff": "red_l"}},
        {"next": {"sim": {"type": "physical", "isESim": false}}},
        {"next": {"delivery": {
            "method": "nova_poshta",
            "firstName": "Олена",
            "lastName": "Коваль",
            "novaPoshtaData": {"city": "Київ", "warehouse": "12"}
        }}},
        "back",
        {"next": {"delivery": {"method": "courier", "firstName": "Олена", "lastName": "Коваль"}}}
    ]"#;

    let report = replay::run_script(replay::parse_script(script).unwrap()).unwrap();
    assert_eq!(report.stage, Stage::Status);
    assert_eq!(report.transitions.len(), 6);

    let delivery = report.record.delivery.unwrap();
    assert_eq!(delivery.method, DeliveryMethod::Courier);
    assert!(delivery.nova_poshta_data.is_none());
    assert_eq!(
        report.record.number.map(|n| n.verification_method),
        Some(VerificationMethod::Call)
    );
}
