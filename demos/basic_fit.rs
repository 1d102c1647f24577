//! Basic fitting example: fit S-curves to a small in-memory dataset and
//! project one entity to 2030.
//!
//! Run from the project root:
//!   cargo run --example basic_fit

use ev_adoption_analyzer::analysis::{fit_dataset, project, CurveFitter};
use ev_adoption_analyzer::io::{read_csv_from_bytes, CsvReadOptions};
use ev_adoption_analyzer::visualization::{print_params_table, print_projection_table};

const DATA: &str = "\
Entity,Code,Year,Electric car sales (% of new car sales)
Norway,NOR,2015,22.4
Norway,NOR,2017,39.3
Norway,NOR,2019,55.9
Norway,NOR,2021,86.2
Norway,NOR,2023,93.0
China,CHN,2015,1.3
China,CHN,2017,2.6
China,CHN,2019,5.4
China,CHN,2021,13.3
China,CHN,2023,29.0
";

fn main() {
    let dataset = read_csv_from_bytes(DATA.as_bytes(), "demo", &CsvReadOptions::default())
        .expect("Failed to parse demo CSV");

    let fitter = CurveFitter::default();
    let result = fit_dataset(&dataset, &fitter, 0.95);
    print_params_table(&result);

    if let Some(fit) = result.fit_for("Norway") {
        let series = dataset.entity("Norway").expect("Norway in demo data");
        let (start, _) = series.year_range().expect("non-empty series");
        let projection = project(&fit.params, start, 2030.0);
        print_projection_table("Norway", &projection);
    }
}
