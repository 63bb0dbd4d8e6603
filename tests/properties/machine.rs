//! Property tests for the orchestration machine.

use proptest::prelude::*;

use stackloop::domain::machine::{Dispatch, Machine, MachineEvent, State};
use stackloop::{Fingerprint, Stage, StageFailure};

fn fingerprint() -> impl Strategy<Value = Fingerprint> {
    // A tiny alphabet so synth results often collide with the deployed hash
    prop_oneof![Just("aaaa"), Just("bbbb"), Just("cccc")].prop_map(Fingerprint::from)
}

fn failure(stage: Stage) -> StageFailure {
    StageFailure::new(stage, "boom")
}

fn event() -> impl Strategy<Value = MachineEvent> {
    prop_oneof![
        3 => Just(MachineEvent::FileChange),
        2 => Just(MachineEvent::TriggerDeploy),
        2 => Just(MachineEvent::BuildDone(Ok(()))),
        1 => Just(MachineEvent::BuildDone(Err(failure(Stage::Build)))),
        3 => fingerprint().prop_map(|f| MachineEvent::SynthDone(Ok(f))),
        1 => Just(MachineEvent::SynthDone(Err(failure(Stage::Synth)))),
        2 => Just(MachineEvent::DeployDone(Ok(()))),
        1 => Just(MachineEvent::DeployDone(Err(failure(Stage::Deploy)))),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Entering `building` always clears the dirty flag.
    #[test]
    fn property_building_entry_clears_dirty(
        baseline in fingerprint(),
        events in proptest::collection::vec(event(), 0..64),
    ) {
        let mut machine = Machine::new(baseline);
        for event in &events {
            if let Dispatch::Transitioned(t) = machine.dispatch(event) {
                if t.to == State::Building {
                    prop_assert!(!machine.context().dirty);
                }
                prop_assert_eq!(t.invoke, t.to.stage());
            }
        }
    }

    /// PROPERTY: A change while a stage is in flight is recorded, never dropped.
    #[test]
    fn property_change_during_stage_sets_dirty(
        baseline in fingerprint(),
        events in proptest::collection::vec(event(), 0..64),
    ) {
        let mut machine = Machine::new(baseline);
        for event in &events {
            let before = machine.state();
            let outcome = machine.dispatch(event);
            if *event == MachineEvent::FileChange {
                match before {
                    State::Idle | State::Deployable => {
                        prop_assert!(matches!(outcome, Dispatch::Transitioned(_)));
                        prop_assert_eq!(machine.state(), State::Building);
                    }
                    _ => {
                        prop_assert_eq!(outcome, Dispatch::Recorded);
                        prop_assert_eq!(machine.state(), before);
                        prop_assert!(machine.context().dirty);
                    }
                }
            }
        }
    }

    /// PROPERTY: A dirty machine never completes a stage into idle or deployable.
    #[test]
    fn property_dirty_wins_over_completion(
        baseline in fingerprint(),
        events in proptest::collection::vec(event(), 0..64),
    ) {
        let mut machine = Machine::new(baseline);
        for event in &events {
            let was_dirty = machine.context().dirty;
            let is_completion = event.completed_stage().is_some();
            let is_deploy_failure = matches!(event, MachineEvent::DeployDone(Err(_)));
            if let Dispatch::Transitioned(t) = machine.dispatch(event) {
                if was_dirty && is_completion && !is_deploy_failure {
                    prop_assert_eq!(t.to, State::Building);
                }
            }
        }
    }

    /// PROPERTY: `deployed_hash` only moves on a successful deploy, to the pending hash.
    #[test]
    fn property_deployed_hash_follows_pending(
        baseline in fingerprint(),
        events in proptest::collection::vec(event(), 0..64),
    ) {
        let mut machine = Machine::new(baseline);
        for event in &events {
            let before = machine.context().clone();
            let state = machine.state();
            machine.dispatch(event);
            let after = machine.context();

            if state == State::Deploying && *event == MachineEvent::DeployDone(Ok(())) {
                prop_assert_eq!(Some(&after.deployed_hash), before.pending_hash.as_ref());
            } else {
                prop_assert_eq!(&after.deployed_hash, &before.deployed_hash);
            }
        }
    }

    /// PROPERTY: `deployable` always has a pending hash that differs from the deployed one.
    #[test]
    fn property_deployable_has_new_pending_hash(
        baseline in fingerprint(),
        events in proptest::collection::vec(event(), 0..64),
    ) {
        let mut machine = Machine::new(baseline);
        for event in &events {
            machine.dispatch(event);
            if machine.state() == State::Deployable {
                let context = machine.context();
                prop_assert!(context.pending_hash.is_some());
                prop_assert_ne!(context.pending_hash.as_ref(), Some(&context.deployed_hash));
            }
        }
    }

    /// PROPERTY: Once halted, the machine stays halted.
    #[test]
    fn property_halted_is_terminal(
        baseline in fingerprint(),
        events in proptest::collection::vec(event(), 0..64),
    ) {
        let mut machine = Machine::new(baseline);
        let mut halted = false;
        for event in &events {
            machine.dispatch(event);
            if halted {
                prop_assert_eq!(machine.state(), State::Halted);
            }
            halted = machine.state() == State::Halted;
        }
    }
}
