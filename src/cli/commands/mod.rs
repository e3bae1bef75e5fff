mod list;

pub use list::cmd_list_cafes;
