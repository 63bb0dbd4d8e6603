//! Tests for the orchestration machine

use super::*;
use crate::error::StageFailure;

fn baseline() -> Fingerprint {
    Fingerprint::from("baseline")
}

fn built() -> MachineEvent {
    MachineEvent::BuildDone(Ok(()))
}

fn synthed(hash: &str) -> MachineEvent {
    MachineEvent::SynthDone(Ok(Fingerprint::from(hash)))
}

fn deployed() -> MachineEvent {
    MachineEvent::DeployDone(Ok(()))
}

fn failed(stage: Stage) -> StageFailure {
    StageFailure::new(stage, "boom")
}

fn to_state(dispatch: Dispatch) -> State {
    match dispatch {
        Dispatch::Transitioned(t) => t.to,
        other => panic!("expected a transition, got {other:?}"),
    }
}

/// Machine that has absorbed the initial synth and sits in `idle`
fn idle_machine() -> Machine {
    let mut machine = Machine::new(baseline());
    machine.dispatch(&synthed("baseline"));
    assert_eq!(machine.state(), State::Idle);
    machine
}

/// Machine sitting in `deployable` with `pending_hash = next`
fn deployable_machine(next: &str) -> Machine {
    let mut machine = Machine::new(baseline());
    machine.dispatch(&synthed(next));
    assert_eq!(machine.state(), State::Deployable);
    machine
}

#[test]
fn starts_in_synthing_and_invokes_synth() {
    let machine = Machine::new(baseline());
    assert_eq!(machine.state(), State::Synthing);
    assert_eq!(machine.entry_stage(), Some(Stage::Synth));
    assert!(!machine.context().dirty);
    assert_eq!(machine.context().pending_hash, None);
}

// === Scenarios ===

#[test]
fn scenario_a_initial_synth_matching_baseline_goes_idle() {
    let mut machine = Machine::new(baseline());
    let dispatch = machine.dispatch(&synthed("baseline"));

    assert_eq!(
        dispatch,
        Dispatch::Transitioned(Transition {
            from: State::Synthing,
            to: State::Idle,
            invoke: None,
        })
    );
    assert_eq!(machine.context().deployed_hash, baseline());
    assert_eq!(machine.context().pending_hash, None);
}

#[test]
fn scenario_b_change_build_synth_reaches_deployable() {
    let mut machine = idle_machine();

    let dispatch = machine.dispatch(&MachineEvent::FileChange);
    assert_eq!(
        dispatch,
        Dispatch::Transitioned(Transition {
            from: State::Idle,
            to: State::Building,
            invoke: Some(Stage::Build),
        })
    );
    assert!(!machine.context().dirty);

    assert_eq!(to_state(machine.dispatch(&built())), State::Synthing);
    assert_eq!(to_state(machine.dispatch(&synthed("next"))), State::Deployable);
    assert_eq!(
        machine.context().pending_hash,
        Some(Fingerprint::from("next"))
    );
    assert_eq!(machine.context().deployed_hash, baseline());
}

#[test]
fn scenario_c_change_in_deployable_rebuilds_then_idles_on_same_output() {
    let mut machine = deployable_machine("next");

    assert_eq!(
        to_state(machine.dispatch(&MachineEvent::FileChange)),
        State::Building
    );
    assert!(!machine.context().dirty);
    assert_eq!(to_state(machine.dispatch(&built())), State::Synthing);
    assert_eq!(to_state(machine.dispatch(&synthed("baseline"))), State::Idle);
}

#[test]
fn scenario_d_change_during_build_restarts_build() {
    let mut machine = idle_machine();
    machine.dispatch(&MachineEvent::FileChange);

    assert_eq!(machine.dispatch(&MachineEvent::FileChange), Dispatch::Recorded);
    assert!(machine.context().dirty);
    assert_eq!(machine.state(), State::Building);

    let dispatch = machine.dispatch(&built());
    assert_eq!(
        dispatch,
        Dispatch::Transitioned(Transition {
            from: State::Building,
            to: State::Building,
            invoke: Some(Stage::Build),
        })
    );
    assert!(!machine.context().dirty);
}

#[test]
fn scenario_e_trigger_deploy_then_idle_with_hash_updated() {
    let mut machine = deployable_machine("next");

    let dispatch = machine.dispatch(&MachineEvent::TriggerDeploy);
    assert_eq!(
        dispatch,
        Dispatch::Transitioned(Transition {
            from: State::Deployable,
            to: State::Deploying,
            invoke: Some(Stage::Deploy),
        })
    );
    assert_eq!(to_state(machine.dispatch(&deployed())), State::Idle);
    assert_eq!(machine.context().deployed_hash, Fingerprint::from("next"));
}

// === Guards ===

#[test]
fn dirty_wins_over_changed_fingerprint_in_synth() {
    let mut machine = Machine::new(baseline());
    machine.dispatch(&MachineEvent::FileChange);

    assert_eq!(to_state(machine.dispatch(&synthed("next"))), State::Building);
    assert_eq!(machine.context().pending_hash, None);
}

#[test]
fn dirty_wins_over_failure_in_build_and_synth() {
    let mut machine = idle_machine();
    machine.dispatch(&MachineEvent::FileChange);
    machine.dispatch(&MachineEvent::FileChange);
    assert_eq!(
        to_state(machine.dispatch(&MachineEvent::BuildDone(Err(failed(Stage::Build))))),
        State::Building
    );

    machine.dispatch(&built());
    machine.dispatch(&MachineEvent::FileChange);
    assert_eq!(
        to_state(machine.dispatch(&MachineEvent::SynthDone(Err(failed(Stage::Synth))))),
        State::Building
    );
}

#[test]
fn build_failure_without_changes_goes_idle() {
    let mut machine = idle_machine();
    machine.dispatch(&MachineEvent::FileChange);
    assert_eq!(
        to_state(machine.dispatch(&MachineEvent::BuildDone(Err(failed(Stage::Build))))),
        State::Idle
    );
}

#[test]
fn synth_failure_without_changes_goes_idle() {
    let mut machine = Machine::new(baseline());
    assert_eq!(
        to_state(machine.dispatch(&MachineEvent::SynthDone(Err(failed(Stage::Synth))))),
        State::Idle
    );
    assert_eq!(machine.context().deployed_hash, baseline());
}

#[test]
fn unchanged_synth_twice_never_becomes_deployable() {
    let mut machine = idle_machine();
    for _ in 0..2 {
        machine.dispatch(&MachineEvent::FileChange);
        machine.dispatch(&built());
        assert_eq!(to_state(machine.dispatch(&synthed("baseline"))), State::Idle);
        assert_eq!(machine.context().pending_hash, None);
        assert_eq!(machine.context().deployed_hash, baseline());
    }
}

#[test]
fn deploy_with_interleaved_change_updates_hash_and_rebuilds() {
    let mut machine = deployable_machine("next");
    machine.dispatch(&MachineEvent::TriggerDeploy);

    assert_eq!(machine.dispatch(&MachineEvent::FileChange), Dispatch::Recorded);
    assert_eq!(to_state(machine.dispatch(&deployed())), State::Building);
    assert_eq!(machine.context().deployed_hash, Fingerprint::from("next"));
    assert!(!machine.context().dirty);
}

#[test]
fn deploy_failure_halts_and_keeps_deployed_hash() {
    let mut machine = deployable_machine("next");
    machine.dispatch(&MachineEvent::TriggerDeploy);

    let dispatch = machine.dispatch(&MachineEvent::DeployDone(Err(failed(Stage::Deploy))));
    assert_eq!(
        dispatch,
        Dispatch::Transitioned(Transition {
            from: State::Deploying,
            to: State::Halted,
            invoke: None,
        })
    );
    assert!(machine.state().is_terminal());
    assert_eq!(machine.context().deployed_hash, baseline());

    // Changes are still recorded, but nothing leaves the halted state
    assert_eq!(machine.dispatch(&MachineEvent::FileChange), Dispatch::Recorded);
    assert_eq!(machine.dispatch(&MachineEvent::TriggerDeploy), Dispatch::Ignored);
    assert_eq!(machine.state(), State::Halted);
}

// === Ignored events ===

#[test]
fn trigger_deploy_outside_deployable_is_ignored() {
    let mut machine = idle_machine();
    assert_eq!(machine.dispatch(&MachineEvent::TriggerDeploy), Dispatch::Ignored);
    assert_eq!(machine.state(), State::Idle);

    machine.dispatch(&MachineEvent::FileChange);
    assert_eq!(machine.dispatch(&MachineEvent::TriggerDeploy), Dispatch::Ignored);
    assert_eq!(machine.state(), State::Building);
}

#[test]
fn completion_for_a_stage_not_in_flight_is_ignored() {
    let mut machine = idle_machine();
    let before = machine.context().clone();

    assert_eq!(machine.dispatch(&built()), Dispatch::Ignored);
    assert_eq!(machine.dispatch(&synthed("next")), Dispatch::Ignored);
    assert_eq!(machine.dispatch(&deployed()), Dispatch::Ignored);
    assert_eq!(machine.state(), State::Idle);
    assert_eq!(machine.context(), &before);
}

#[test]
fn entry_to_building_clears_dirty_even_when_dirty_caused_it() {
    let mut machine = Machine::new(baseline());
    machine.dispatch(&MachineEvent::FileChange);
    assert!(machine.context().dirty);

    machine.dispatch(&synthed("baseline"));
    assert_eq!(machine.state(), State::Building);
    assert!(!machine.context().dirty);
}
