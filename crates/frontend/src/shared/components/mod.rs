pub mod data_table;
pub mod list_status;
pub mod pagination;
pub mod remote_list;
pub mod status_filter;
