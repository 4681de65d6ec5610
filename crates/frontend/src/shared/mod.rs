pub mod list_state;
