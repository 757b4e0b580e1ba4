// Job matching engine.
// Pure scorers (skills, experience, location, salary) feed the aggregator;
// the selector ranks a job set and the service drives it over a MatchStore.

pub mod aggregator;
pub mod experience;
pub mod handlers;
pub mod location;
pub mod salary;
pub mod selector;
pub mod service;
pub mod skills;
