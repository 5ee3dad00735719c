//! Demo behavior modules wired into `warden replay`.
//!
//! Deliberately small: each one reads the blackboard and files production
//! requests under its own requester name.

use warden_core::{GamePhase, ResourceType, StrategyFlag, TickContext, Value};
use warden_kernel::{ControlPlane, ControlState};
use warden_sched::{FnTask, PhaseSet, SchedulerError, TaskConfig, TaskPriority, TaskResult};

const DRONE_CAP: u32 = 66;
const EXPAND_COST: u32 = 300;

pub fn register_all(plane: &mut ControlPlane) -> Result<(), SchedulerError> {
    plane.register_task(
        TaskConfig::new("defense").priority(TaskPriority::Critical),
        Box::new(FnTask::new(defense)),
    )?;
    plane.register_task(
        TaskConfig::new("economy")
            .priority(TaskPriority::Medium)
            .predicate(|s: &ControlState| Ok(s.store().resources().supply_left() > 0)),
        Box::new(FnTask::new(economy)),
    )?;
    plane.register_task(
        TaskConfig::new("supply")
            .priority(TaskPriority::High)
            .min_interval(4),
        Box::new(FnTask::new(supply)),
    )?;
    plane.register_task(
        TaskConfig::new("expansion")
            .priority(TaskPriority::Low)
            .phases(PhaseSet::from_phase(GamePhase::Early))
            .predicate(|s: &ControlState| {
                let store = s.store();
                if store.flag(StrategyFlag::ExpansionBlocked) {
                    return Ok(false);
                }
                Ok(store.resources().minerals >= EXPAND_COST)
            }),
        Box::new(FnTask::new(expansion)),
    )?;
    plane.register_task(
        TaskConfig::new("scouting")
            .priority(TaskPriority::Minimal)
            .phases(PhaseSet::only(GamePhase::Opening).with(GamePhase::Early))
            .min_interval(22),
        Box::new(FnTask::new(scouting)),
    )?;
    Ok(())
}

fn defense(_ctx: &TickContext, state: &mut ControlState) -> TaskResult {
    let threat = *state.store().threat();
    if !threat.level.is_elevated() {
        return Ok(());
    }

    let lings = ((threat.enemy_strength / 2.0).ceil() as u32).clamp(2, 12);
    state.request("Zergling", lings, "defense", None);

    if threat.rushing && state.reserve("SpineCrawler", "defense", Some(30.0)) {
        state.request("SpineCrawler", 1, "defense", None);
    }
    if threat.air_threat {
        state.request("Queen", 2, "defense", None);
    }
    Ok(())
}

fn economy(_ctx: &TickContext, state: &mut ControlState) -> TaskResult {
    let drones = state.store().unit_count(&ResourceType::from_static("Drone"));
    if drones.total() < DRONE_CAP {
        state.request("Drone", 1, "economy", None);
    }
    Ok(())
}

fn supply(_ctx: &TickContext, state: &mut ControlState) -> TaskResult {
    let resources = *state.store().resources();
    let overlords = state.store().unit_count(&ResourceType::from_static("Overlord"));
    if resources.supply_cap < warden_core::MAX_SUPPLY
        && resources.supply_left() <= 2
        && overlords.pending == 0
    {
        state.request("Overlord", 1, "production", None);
    }
    Ok(())
}

fn expansion(_ctx: &TickContext, state: &mut ControlState) -> TaskResult {
    let bases = state.memo("base_count", None, |store| {
        let hatch = store.unit_count(&ResourceType::from_static("Hatchery"));
        Value::from(hatch.total())
    });
    let bases = bases.as_int().unwrap_or(0);
    let wanted = match state.store().phase() {
        GamePhase::Opening | GamePhase::Early => 2,
        GamePhase::Mid => 3,
        GamePhase::Late => 4,
    };
    if bases < wanted && state.reserve("Hatchery", "economy", None) {
        state.request("Hatchery", 1, "economy", None);
    }
    Ok(())
}

fn scouting(ctx: &TickContext, state: &mut ControlState) -> TaskResult {
    state.request("Zergling", 1, "scouting", None);
    state.store_mut().set_extension("last_scout_at", ctx.time);
    Ok(())
}

#[cfg(test)]
mod tests {
    use warden_core::{ThreatLevel, ThreatUpdate};
    use warden_kernel::{ControlConfig, Observation};

    use super::*;

    fn plane() -> ControlPlane {
        let mut plane = ControlPlane::new(ControlConfig::default());
        register_all(&mut plane).unwrap();
        plane
    }

    #[test]
    fn quiet_opening_builds_drones_and_scouts() {
        let mut plane = plane();
        let mut obs = Observation::at(5.0);
        obs.minerals = 50;
        obs.supply_used = 12;
        obs.supply_cap = 20;
        plane.tick(&obs);

        let drained = plane.drain_requests();
        let names: Vec<_> = drained.iter().map(|r| r.resource.as_str()).collect();
        assert_eq!(names, ["Drone", "Zergling"]);
        assert!(plane.state().store().extension("last_scout_at").is_some());
    }

    #[test]
    fn rush_puts_defense_first() {
        let mut plane = plane();
        let mut obs = Observation::at(150.0);
        obs.minerals = 400;
        obs.supply_used = 20;
        obs.supply_cap = 22;
        obs.threat = ThreatUpdate::new(ThreatLevel::High)
            .with_strength(9.0)
            .with_rushing(true);
        plane.tick(&obs);

        let first = plane.dequeue_next().unwrap();
        assert_eq!(first.requester.as_str(), "defense");
        assert_eq!(first.priority, 0);
        assert!(plane.state().is_reserved(&ResourceType::from_static("SpineCrawler"), Some(30.0)));
    }

    #[test]
    fn expansion_waits_for_minerals() {
        let mut plane = plane();
        let mut obs = Observation::at(200.0);
        obs.minerals = 100;
        obs.supply_cap = 30;
        plane.tick(&obs);
        assert!(!plane.last_report().was_invoked("expansion"));

        obs.time = 201.0;
        obs.minerals = 350;
        plane.tick(&obs);
        assert!(plane.last_report().was_invoked("expansion"));
        assert!(plane.state().is_reserved(&ResourceType::from_static("Hatchery"), None));
    }
}
