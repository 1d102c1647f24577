mod charts;
mod tables;

pub use charts::{format_scurve_chart, format_timeline, print_scurve_chart, print_timeline};
pub use tables::{
    format_intervals_table, format_params_table, format_projection_table, print_intervals_table,
    print_params_table, print_projection_table,
};
