pub mod idea_researcher;
pub mod next_steps_planner;
pub mod verdict_decider;
