pub mod primed;
