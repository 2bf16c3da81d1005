//! Agent orchestrator
//!
//! Keeps an ordered registry of agents, dispatches named tasks to them and
//! records the latest result of every `(agent, task)` pair in a ledger.
//!
//! Lookups are linear scans in registration order. Registering two agents
//! under the same name is allowed; the first one registered shadows the rest
//! until it is removed.

use std::any::{self, Any};
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::agent::base::{shared, Agent, AgentCore, AgentRef};
use crate::core::{result_key, Ledger, OrafError, Params, Result, State, TaskOutput};

/// Default orchestrator name
pub const DEFAULT_NAME: &str = "OR-AF";

/// A registry slot.
///
/// `name` is the agent's name as last observed. Lookups read the live name
/// and fall back to it only while the agent is mutably borrowed elsewhere.
struct Registration {
    name: String,
    agent: AgentRef,
}

impl Registration {
    fn current_name(&self) -> String {
        match self.agent.try_borrow() {
            Ok(agent) => agent.name().to_string(),
            Err(_) => self.name.clone(),
        }
    }

    fn matches(&self, name: &str) -> bool {
        match self.agent.try_borrow() {
            Ok(agent) => agent.name() == name,
            Err(_) => self.name == name,
        }
    }
}

/// Adapter that lets a boxed agent live behind an [`AgentRef`]
struct BoxedAgent(Box<dyn Agent>);

impl Agent for BoxedAgent {
    fn core(&self) -> &AgentCore {
        self.0.core()
    }

    fn core_mut(&mut self) -> &mut AgentCore {
        self.0.core_mut()
    }

    fn execute(&mut self, task: &str, params: Params) -> Result<TaskOutput> {
        self.0.execute(task, params)
    }

    fn update_state(&mut self, updates: State) {
        self.0.update_state(updates);
    }

    fn reset(&mut self) {
        self.0.reset();
    }
}

/// Registry and dispatcher for agents
pub struct Orchestrator {
    /// Informational name
    name: String,
    /// Registered agents in registration order
    agents: Vec<Registration>,
    /// Latest result per `"<agent>:<task>"`
    results: Ledger,
}

impl Orchestrator {
    /// Create an empty orchestrator
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            agents: Vec::new(),
            results: Ledger::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append an agent to the registry.
    ///
    /// # Panics
    ///
    /// Panics if the caller holds a mutable borrow of `agent`.
    pub fn register_agent(&mut self, agent: AgentRef) {
        let name = agent.borrow().name().to_string();
        debug!(
            orchestrator = %self.name,
            agent = %name,
            position = self.agents.len(),
            "registering agent"
        );
        self.agents.push(Registration { name, agent });
    }

    /// Wrap `agent` in a shared handle, register it and hand the handle back
    pub fn register<A: Agent + 'static>(&mut self, agent: A) -> AgentRef {
        let handle = shared(agent);
        self.register_agent(handle.clone());
        handle
    }

    /// Register a type-erased value.
    ///
    /// Accepts the two agent forms that survive type erasure: an
    /// [`AgentRef`] or a `Box<dyn Agent>`. Anything else, including a
    /// concrete agent or an `Rc<RefCell<ConcreteAgent>>` that was never
    /// coerced to `dyn Agent`, yields [`OrafError::TypeMismatch`] and leaves
    /// the registry untouched. Concrete agents go through
    /// [`register`](Self::register) or [`register_agent`](Self::register_agent),
    /// where the compiler does the check.
    pub fn register_value<T: Any>(&mut self, value: T) -> Result<()> {
        let value: Box<dyn Any> = Box::new(value);
        let value = match value.downcast::<AgentRef>() {
            Ok(agent) => {
                self.register_agent(*agent);
                return Ok(());
            }
            Err(other) => other,
        };
        match value.downcast::<Box<dyn Agent>>() {
            Ok(agent) => {
                self.register(BoxedAgent(*agent));
                Ok(())
            }
            Err(_) => Err(OrafError::type_mismatch(any::type_name::<T>())),
        }
    }

    /// Remove the first agent named `name`. Returns whether one was removed.
    pub fn remove_agent(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(index) => {
                self.agents.remove(index);
                debug!(orchestrator = %self.name, agent = name, index, "removed agent");
                true
            }
            None => false,
        }
    }

    /// First agent registered under `name`, if any
    pub fn get_agent(&self, name: &str) -> Option<AgentRef> {
        self.position(name).map(|index| self.agents[index].agent.clone())
    }

    /// Run `task` on the agent named `agent_name` and record the result.
    ///
    /// Errors from the agent are returned exactly as produced and leave the
    /// ledger untouched.
    pub fn execute_task(
        &mut self,
        agent_name: &str,
        task: &str,
        params: Params,
    ) -> Result<TaskOutput> {
        let agent = self
            .get_agent(agent_name)
            .ok_or_else(|| OrafError::AgentNotFound(agent_name.to_string()))?;

        trace!(agent = agent_name, task, params = params.len(), "dispatching task");

        let result = {
            let mut agent = agent.try_borrow_mut().map_err(|_| {
                OrafError::Other(format!("Agent '{}' is already in use", agent_name))
            })?;
            agent.execute(task, params)?
        };

        let key = result_key(agent_name, task);
        debug!(key = %key, "recorded task result");
        self.results.insert(key, result.clone());

        Ok(result)
    }

    /// Snapshot of the result ledger
    pub fn get_results(&self) -> Ledger {
        self.results.clone()
    }

    /// Clear the ledger and reset every registered agent, in order.
    ///
    /// Agents stay registered. If any agent is borrowed elsewhere nothing is
    /// reset and an error naming it is returned.
    pub fn reset(&mut self) -> Result<()> {
        let mut guards = Vec::with_capacity(self.agents.len());
        for (i, registration) in self.agents.iter().enumerate() {
            // The same handle may be registered more than once.
            if self.agents[..i]
                .iter()
                .any(|r| Rc::ptr_eq(&r.agent, &registration.agent))
            {
                continue;
            }
            let guard = registration.agent.try_borrow_mut().map_err(|_| {
                OrafError::Other(format!(
                    "Agent '{}' is already in use",
                    registration.current_name()
                ))
            })?;
            guards.push(guard);
        }

        for agent in guards.iter_mut() {
            agent.reset();
        }
        drop(guards);

        self.results.clear();
        debug!(orchestrator = %self.name, agents = self.agents.len(), "reset");
        Ok(())
    }

    /// Registered agents in registration order
    pub fn agents(&self) -> impl Iterator<Item = &AgentRef> {
        self.agents.iter().map(|r| &r.agent)
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    pub fn agent_names(&self) -> Vec<String> {
        self.agents.iter().map(Registration::current_name).collect()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.agents.iter().position(|r| r.matches(name))
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new(DEFAULT_NAME)
    }
}

impl fmt::Display for Orchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Orchestrator(name='{}', agents={})",
            self.name,
            self.agents.len()
        )
    }
}

impl fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::base::{AgentCore, BaseAgent};
    use serde_json::json;
    use std::rc::Rc;

    struct MockAgent {
        core: AgentCore,
    }

    impl MockAgent {
        fn new(name: &str) -> Self {
            Self {
                core: AgentCore::new(name),
            }
        }
    }

    impl Agent for MockAgent {
        fn core(&self) -> &AgentCore {
            &self.core
        }

        fn core_mut(&mut self) -> &mut AgentCore {
            &mut self.core
        }

        fn execute(&mut self, task: &str, params: Params) -> Result<TaskOutput> {
            Ok(json!(format!(
                "{} executed {} with {}",
                self.core.name(),
                task,
                serde_json::Value::Object(params)
            )))
        }
    }

    #[test]
    fn test_orchestrator_creation() {
        let orchestrator = Orchestrator::default();
        assert_eq!(orchestrator.name(), "OR-AF");
        assert_eq!(orchestrator.agent_count(), 0);

        let custom = Orchestrator::new("CustomFramework");
        assert_eq!(custom.name(), "CustomFramework");
    }

    #[test]
    fn test_register_agents_in_order() {
        let mut orchestrator = Orchestrator::default();
        let first = orchestrator.register(MockAgent::new("agent1"));
        orchestrator.register(MockAgent::new("agent2"));

        assert_eq!(orchestrator.agent_names(), vec!["agent1", "agent2"]);
        let registered = orchestrator.agents().next().unwrap();
        assert!(Rc::ptr_eq(registered, &first));
    }

    #[test]
    fn test_register_value_rejects_non_agents() {
        let mut orchestrator = Orchestrator::default();
        let err = orchestrator.register_value("not an agent").unwrap_err();
        assert!(matches!(err, OrafError::TypeMismatch { ref found } if found.contains("str")));
        assert_eq!(orchestrator.agent_count(), 0);
    }

    #[test]
    fn test_register_value_accepts_agent_handles() {
        let mut orchestrator = Orchestrator::default();
        let handle = shared(MockAgent::new("agent1"));
        orchestrator.register_value(handle).unwrap();
        assert_eq!(orchestrator.agent_count(), 1);
    }

    #[test]
    fn test_get_agent() {
        let mut orchestrator = Orchestrator::default();
        assert!(orchestrator.get_agent("agent1").is_none());

        let handle = orchestrator.register(MockAgent::new("agent1"));
        let found = orchestrator.get_agent("agent1").unwrap();
        assert!(Rc::ptr_eq(&found, &handle));
        assert!(orchestrator.get_agent("nonexistent").is_none());
    }

    #[test]
    fn test_remove_agent() {
        let mut orchestrator = Orchestrator::default();
        orchestrator.register(MockAgent::new("agent1"));

        assert!(!orchestrator.remove_agent("nonexistent"));
        assert_eq!(orchestrator.agent_count(), 1);

        assert!(orchestrator.remove_agent("agent1"));
        assert_eq!(orchestrator.agent_count(), 0);
    }

    #[test]
    fn test_execute_task_records_result() {
        let mut orchestrator = Orchestrator::default();
        orchestrator.register(MockAgent::new("agent1"));

        let mut params = Params::new();
        params.insert("param".to_string(), json!("value"));
        let result = orchestrator
            .execute_task("agent1", "test_task", params)
            .unwrap();

        let text = result.as_str().unwrap();
        assert!(text.contains("test_task"));
        assert!(text.contains("param"));
        assert_eq!(orchestrator.get_results()["agent1:test_task"], result);
    }

    #[test]
    fn test_execute_task_agent_not_found() {
        let mut orchestrator = Orchestrator::default();
        let err = orchestrator
            .execute_task("nonexistent", "task", Params::new())
            .unwrap_err();
        assert!(matches!(err, OrafError::AgentNotFound(ref name) if name == "nonexistent"));
        assert!(orchestrator.get_results().is_empty());
    }

    #[test]
    fn test_agent_errors_pass_through_unrecorded() {
        let mut orchestrator = Orchestrator::default();
        orchestrator.register(BaseAgent::new(AgentCore::new("base")));

        let err = orchestrator
            .execute_task("base", "task", Params::new())
            .unwrap_err();
        assert!(matches!(err, OrafError::Unimplemented { .. }));
        assert!(orchestrator.get_results().is_empty());
    }

    #[test]
    fn test_execute_task_while_borrowed() {
        let mut orchestrator = Orchestrator::default();
        let handle = orchestrator.register(MockAgent::new("agent1"));

        let _guard = handle.borrow_mut();
        let err = orchestrator
            .execute_task("agent1", "task", Params::new())
            .unwrap_err();
        assert!(matches!(err, OrafError::Other(_)));
    }

    #[test]
    fn test_get_results_is_a_copy() {
        let mut orchestrator = Orchestrator::default();
        orchestrator.register(MockAgent::new("agent1"));
        orchestrator
            .execute_task("agent1", "task1", Params::new())
            .unwrap();

        let mut snapshot = orchestrator.get_results();
        snapshot.clear();
        assert_eq!(orchestrator.get_results().len(), 1);
    }

    #[test]
    fn test_reset_clears_results_and_state() {
        let mut orchestrator = Orchestrator::default();
        let handle = orchestrator.register(MockAgent::new("agent1"));

        let mut updates = Params::new();
        updates.insert("key".to_string(), json!("value"));
        handle.borrow_mut().update_state(updates);
        orchestrator
            .execute_task("agent1", "task", Params::new())
            .unwrap();

        orchestrator.reset().unwrap();

        assert!(orchestrator.get_results().is_empty());
        assert!(handle.borrow().get_state().is_empty());
        assert_eq!(orchestrator.agent_count(), 1);
    }

    #[test]
    fn test_reset_while_borrowed_changes_nothing() {
        let mut orchestrator = Orchestrator::default();
        let first = orchestrator.register(MockAgent::new("agent1"));
        let second = orchestrator.register(MockAgent::new("agent2"));

        let mut updates = Params::new();
        updates.insert("key".to_string(), json!("value"));
        first.borrow_mut().update_state(updates);
        orchestrator
            .execute_task("agent1", "task", Params::new())
            .unwrap();

        let guard = second.borrow_mut();
        let err = orchestrator.reset().unwrap_err();
        assert!(matches!(err, OrafError::Other(ref msg) if msg.contains("agent2")));
        drop(guard);

        assert_eq!(first.borrow().get_state()["key"], json!("value"));
        assert_eq!(orchestrator.get_results().len(), 1);

        orchestrator.reset().unwrap();
        assert!(first.borrow().get_state().is_empty());
    }

    #[test]
    fn test_lookup_follows_renamed_agent() {
        let mut orchestrator = Orchestrator::default();
        let handle = orchestrator.register(MockAgent::new("echo"));

        *handle.borrow_mut().core_mut() = AgentCore::new("renamed");

        assert!(orchestrator.get_agent("echo").is_none());
        let found = orchestrator.get_agent("renamed").unwrap();
        assert!(Rc::ptr_eq(&found, &handle));
        assert_eq!(orchestrator.agent_names(), vec!["renamed"]);

        let err = orchestrator
            .execute_task("echo", "t", Params::new())
            .unwrap_err();
        assert!(matches!(err, OrafError::AgentNotFound(_)));
        assert!(!orchestrator.get_results().contains_key("echo:t"));

        assert!(!orchestrator.remove_agent("echo"));
        assert!(orchestrator.remove_agent("renamed"));
        assert_eq!(orchestrator.agent_count(), 0);
    }

    #[test]
    fn test_lookup_uses_cached_name_while_borrowed() {
        let mut orchestrator = Orchestrator::default();
        let handle = orchestrator.register(MockAgent::new("busy"));

        let _guard = handle.borrow_mut();
        let found = orchestrator.get_agent("busy").unwrap();
        assert!(Rc::ptr_eq(&found, &handle));
    }

    #[test]
    fn test_register_value_accepts_boxed_agents() {
        let mut orchestrator = Orchestrator::default();
        let boxed: Box<dyn Agent> = Box::new(MockAgent::new("boxed"));
        orchestrator.register_value(boxed).unwrap();

        let result = orchestrator
            .execute_task("boxed", "task", Params::new())
            .unwrap();
        assert!(result.as_str().unwrap().starts_with("boxed executed task"));
    }

    #[test]
    fn test_register_value_rejects_uncoerced_handles() {
        let mut orchestrator = Orchestrator::default();
        let err = orchestrator
            .register_value(Rc::new(std::cell::RefCell::new(MockAgent::new("typed"))))
            .unwrap_err();
        assert!(matches!(err, OrafError::TypeMismatch { .. }));
        assert_eq!(orchestrator.agent_count(), 0);
    }

    #[test]
    fn test_display() {
        let mut orchestrator = Orchestrator::new("TestFramework");
        orchestrator.register(MockAgent::new("agent1"));
        assert_eq!(
            orchestrator.to_string(),
            "Orchestrator(name='TestFramework', agents=1)"
        );
    }
}
