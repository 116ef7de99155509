//! System Scheduling and Dependency Management
//!
//! Provides deterministic execution order: phases run in ascending order and,
//! inside a phase, systems run after everything they depend on, with
//! registration order breaking ties.

use crate::ecs::system::{System, SystemError, SystemId};
use crate::ecs::World;
use thiserror::Error;

/// System execution phases with explicit ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SystemPhase {
    /// Input processing, entity lifecycle management
    PreUpdate = 0,
    /// Game logic, movement
    Update = 1,
    /// Transform finalisation for the frame
    PostUpdate = 2,
    /// Systems that read finalised transforms of other entities
    /// (camera followers, billboards)
    LateUpdate = 3,
}

impl SystemPhase {
    /// All phases in execution order
    pub const ALL: [Self; 4] = [Self::PreUpdate, Self::Update, Self::PostUpdate, Self::LateUpdate];
}

/// Scheduling errors
#[derive(Error, Debug)]
pub enum SchedulerError {
    /// Two systems registered with the same id
    #[error("System '{0}' is already registered")]
    DuplicateSystem(SystemId),

    /// A dependency names a system that was never registered
    #[error("System '{system}' depends on unknown system '{dependency}'")]
    UnknownDependency {
        /// Dependent system
        system: SystemId,
        /// Missing dependency
        dependency: SystemId,
    },

    /// A dependency lives in a later phase and can never run first
    #[error("System '{system}' ({phase:?}) depends on '{dependency}' which runs later ({dependency_phase:?})")]
    PhaseInversion {
        /// Dependent system
        system: SystemId,
        /// Phase of the dependent system
        phase: SystemPhase,
        /// Dependency
        dependency: SystemId,
        /// Phase of the dependency
        dependency_phase: SystemPhase,
    },

    /// Dependencies inside a phase form a cycle
    #[error("Circular dependency in {phase:?} between {systems:?}")]
    CircularDependency {
        /// Phase containing the cycle
        phase: SystemPhase,
        /// Systems that could not be ordered
        systems: Vec<SystemId>,
    },

    /// A system failed during frame execution
    #[error("System '{system}' failed: {source}")]
    SystemFailed {
        /// Failing system
        system: SystemId,
        /// Underlying error
        #[source]
        source: SystemError,
    },
}

/// Dependency graph for system scheduling
struct DependencyGraph {
    nodes: Vec<SystemNode>,
}

#[derive(Debug)]
struct SystemNode {
    id: SystemId,
    phase: SystemPhase,
    dependencies: Vec<SystemId>,
}

impl DependencyGraph {
    fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Add a system to the dependency graph
    fn add_system(&mut self, system: &dyn System) {
        self.nodes.push(SystemNode {
            id: system.id(),
            phase: system.phase(),
            dependencies: system.dependencies().to_vec(),
        });
    }

    fn node(&self, id: SystemId) -> Option<&SystemNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Generate execution plan for all phases
    fn generate_execution_plan(&self) -> Result<ExecutionPlan, SchedulerError> {
        self.validate_dependencies()?;

        let mut plan = ExecutionPlan::default();
        for phase in SystemPhase::ALL {
            let systems = self.generate_phase_plan(phase)?;
            if !systems.is_empty() {
                plan.phases.push((phase, systems));
            }
        }
        Ok(plan)
    }

    fn validate_dependencies(&self) -> Result<(), SchedulerError> {
        for node in &self.nodes {
            for &dependency in &node.dependencies {
                let dep_node = self.node(dependency).ok_or(SchedulerError::UnknownDependency {
                    system: node.id,
                    dependency,
                })?;
                if dep_node.phase > node.phase {
                    return Err(SchedulerError::PhaseInversion {
                        system: node.id,
                        phase: node.phase,
                        dependency,
                        dependency_phase: dep_node.phase,
                    });
                }
            }
        }
        Ok(())
    }

    /// Order a single phase; dependencies from earlier phases are already met
    fn generate_phase_plan(&self, phase: SystemPhase) -> Result<Vec<SystemId>, SchedulerError> {
        let mut remaining: Vec<&SystemNode> = self.nodes.iter().filter(|node| node.phase == phase).collect();
        let mut ordered = Vec::with_capacity(remaining.len());

        while !remaining.is_empty() {
            let ready = remaining.iter().position(|node| {
                node.dependencies
                    .iter()
                    .all(|dep| !remaining.iter().any(|other| other.id == *dep))
            });

            match ready {
                Some(index) => ordered.push(remaining.remove(index).id),
                None => {
                    return Err(SchedulerError::CircularDependency {
                        phase,
                        systems: remaining.iter().map(|node| node.id).collect(),
                    })
                }
            }
        }

        Ok(ordered)
    }
}

/// Complete execution plan across all phases
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    phases: Vec<(SystemPhase, Vec<SystemId>)>,
}

impl ExecutionPlan {
    /// Get phases in execution order
    pub fn phases(&self) -> &[(SystemPhase, Vec<SystemId>)] {
        &self.phases
    }

    /// Every system id in execution order
    pub fn ordered_ids(&self) -> impl Iterator<Item = SystemId> + '_ {
        self.phases.iter().flat_map(|(_, systems)| systems.iter().copied())
    }
}

/// System scheduler
pub struct SystemScheduler {
    systems: Vec<Box<dyn System>>,
    execution_plan: Option<ExecutionPlan>,
}

impl SystemScheduler {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self {
            systems: Vec::new(),
            execution_plan: None,
        }
    }

    /// Add a system to the scheduler
    pub fn add_system(&mut self, system: Box<dyn System>) -> Result<(), SchedulerError> {
        let id = system.id();
        if self.systems.iter().any(|existing| existing.id() == id) {
            return Err(SchedulerError::DuplicateSystem(id));
        }

        log::debug!("Registered system '{}' in {:?}", id, system.phase());
        self.systems.push(system);
        self.execution_plan = None;
        Ok(())
    }

    /// Number of registered systems
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Build execution plan from current systems
    pub fn build_plan(&mut self) -> Result<&ExecutionPlan, SchedulerError> {
        let mut graph = DependencyGraph::new();
        for system in &self.systems {
            graph.add_system(system.as_ref());
        }

        let plan = graph.generate_execution_plan()?;
        log::debug!("Execution plan: {:?}", plan.ordered_ids().collect::<Vec<_>>());
        Ok(self.execution_plan.insert(plan))
    }

    /// The current plan, if it is up to date with the registered systems
    pub fn execution_plan(&self) -> Option<&ExecutionPlan> {
        self.execution_plan.as_ref()
    }

    /// Execute all systems for one frame
    ///
    /// Stops at the first failing system; later systems do not run.
    pub fn execute_frame(&mut self, world: &mut World, delta_time: f32) -> Result<(), SchedulerError> {
        if self.execution_plan.is_none() {
            self.build_plan()?;
        }
        let order: Vec<SystemId> = self
            .execution_plan
            .as_ref()
            .map(|plan| plan.ordered_ids().collect())
            .unwrap_or_default();

        for id in order {
            let Some(system) = self.systems.iter_mut().find(|system| system.id() == id) else {
                continue;
            };
            log::trace!("Running system '{}'", id);
            system
                .execute(world, delta_time)
                .map_err(|source| SchedulerError::SystemFailed { system: id, source })?;
        }
        Ok(())
    }
}

impl Default for SystemScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Journal = Rc<RefCell<Vec<&'static str>>>;

    struct Recorder {
        id: &'static str,
        phase: SystemPhase,
        dependencies: Vec<SystemId>,
        journal: Journal,
        fail: bool,
    }

    impl Recorder {
        fn boxed(id: &'static str, phase: SystemPhase, deps: &[&'static str], journal: &Journal) -> Box<dyn System> {
            Box::new(Self {
                id,
                phase,
                dependencies: deps.iter().map(|&dep| SystemId(dep)).collect(),
                journal: Rc::clone(journal),
                fail: false,
            })
        }
    }

    impl System for Recorder {
        fn id(&self) -> SystemId {
            SystemId(self.id)
        }

        fn phase(&self) -> SystemPhase {
            self.phase
        }

        fn dependencies(&self) -> &[SystemId] {
            &self.dependencies
        }

        fn execute(&mut self, _world: &mut World, _delta_time: f32) -> Result<(), SystemError> {
            self.journal.borrow_mut().push(self.id);
            if self.fail {
                return Err(SystemError::Custom(format!("{} failed", self.id)));
            }
            Ok(())
        }
    }

    #[test]
    fn test_phases_run_in_order_regardless_of_registration() {
        let journal = Journal::default();
        let mut scheduler = SystemScheduler::new();
        scheduler.add_system(Recorder::boxed("late", SystemPhase::LateUpdate, &[], &journal)).unwrap();
        scheduler.add_system(Recorder::boxed("update", SystemPhase::Update, &[], &journal)).unwrap();
        scheduler.add_system(Recorder::boxed("pre", SystemPhase::PreUpdate, &[], &journal)).unwrap();

        let mut world = World::new();
        scheduler.execute_frame(&mut world, 0.016).unwrap();

        assert_eq!(*journal.borrow(), vec!["pre", "update", "late"]);
    }

    #[test]
    fn test_dependencies_within_phase() {
        let journal = Journal::default();
        let mut scheduler = SystemScheduler::new();
        scheduler.add_system(Recorder::boxed("follow", SystemPhase::Update, &["move"], &journal)).unwrap();
        scheduler.add_system(Recorder::boxed("move", SystemPhase::Update, &["input"], &journal)).unwrap();
        scheduler.add_system(Recorder::boxed("input", SystemPhase::PreUpdate, &[], &journal)).unwrap();
        scheduler.add_system(Recorder::boxed("other", SystemPhase::Update, &[], &journal)).unwrap();

        let plan = scheduler.build_plan().unwrap();
        let order: Vec<_> = plan.ordered_ids().map(|id| id.0).collect();
        assert_eq!(order, vec!["input", "move", "follow", "other"]);
    }

    #[test]
    fn test_duplicate_system_rejected() {
        let journal = Journal::default();
        let mut scheduler = SystemScheduler::new();
        scheduler.add_system(Recorder::boxed("a", SystemPhase::Update, &[], &journal)).unwrap();

        let result = scheduler.add_system(Recorder::boxed("a", SystemPhase::LateUpdate, &[], &journal));
        assert!(matches!(result, Err(SchedulerError::DuplicateSystem(SystemId("a")))));
        assert_eq!(scheduler.system_count(), 1);
    }

    #[test]
    fn test_invalid_graphs() {
        let journal = Journal::default();

        let mut unknown = SystemScheduler::new();
        unknown.add_system(Recorder::boxed("a", SystemPhase::Update, &["ghost"], &journal)).unwrap();
        assert!(matches!(unknown.build_plan(), Err(SchedulerError::UnknownDependency { .. })));

        let mut inverted = SystemScheduler::new();
        inverted.add_system(Recorder::boxed("a", SystemPhase::Update, &["b"], &journal)).unwrap();
        inverted.add_system(Recorder::boxed("b", SystemPhase::LateUpdate, &[], &journal)).unwrap();
        assert!(matches!(inverted.build_plan(), Err(SchedulerError::PhaseInversion { .. })));

        let mut cyclic = SystemScheduler::new();
        cyclic.add_system(Recorder::boxed("a", SystemPhase::Update, &["b"], &journal)).unwrap();
        cyclic.add_system(Recorder::boxed("b", SystemPhase::Update, &["a"], &journal)).unwrap();
        match cyclic.build_plan() {
            Err(SchedulerError::CircularDependency { phase, systems }) => {
                assert_eq!(phase, SystemPhase::Update);
                assert_eq!(systems.len(), 2);
            }
            other => panic!("expected cycle, got {:?}", other.map(|plan| plan.clone())),
        }
    }

    #[test]
    fn test_failure_stops_frame() {
        let journal = Journal::default();
        let mut scheduler = SystemScheduler::new();
        scheduler.add_system(Box::new(Recorder {
            id: "broken",
            phase: SystemPhase::Update,
            dependencies: Vec::new(),
            journal: Rc::clone(&journal),
            fail: true,
        })).unwrap();
        scheduler.add_system(Recorder::boxed("late", SystemPhase::LateUpdate, &[], &journal)).unwrap();

        let mut world = World::new();
        let result = scheduler.execute_frame(&mut world, 0.016);

        assert!(matches!(result, Err(SchedulerError::SystemFailed { system: SystemId("broken"), .. })));
        assert_eq!(*journal.borrow(), vec!["broken"]);
    }

    #[test]
    fn test_adding_system_invalidates_plan() {
        let journal = Journal::default();
        let mut scheduler = SystemScheduler::new();
        scheduler.add_system(Recorder::boxed("a", SystemPhase::Update, &[], &journal)).unwrap();
        scheduler.build_plan().unwrap();
        assert!(scheduler.execution_plan().is_some());

        scheduler.add_system(Recorder::boxed("b", SystemPhase::Update, &[], &journal)).unwrap();
        assert!(scheduler.execution_plan().is_none());
    }
}
