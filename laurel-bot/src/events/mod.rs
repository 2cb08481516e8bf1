pub mod xp_trigger;
