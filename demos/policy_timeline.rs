//! Policy timeline example: render a multi-region timeline from CSV bytes.
//!
//! Run from the project root:
//!   cargo run --example policy_timeline

use ev_adoption_analyzer::config::AnalysisConfig;
use ev_adoption_analyzer::io::read_timeline_from_bytes;
use ev_adoption_analyzer::visualization::print_timeline;

const POLICIES: &str = "\
region,policy,kind,start,end
Norway,Purchase tax exemption,band,1990-01-01,2018-12-31
Norway,VAT exemption,band,2001-01-01,2022-12-31
Norway,Bus lane access,event,2003,
EU,CO2 fleet targets,band,2019-01-01,2030-12-31
UK,ZEV Mandate window,band,2023-01-01,2035-12-31
China,National NEV subsidy program,band,2009-01-01,2022-12-31
US,IRA EV tax credit starts,event,2023-01-01,
";

fn main() {
    let timeline = read_timeline_from_bytes(POLICIES.as_bytes())
        .expect("Failed to parse demo policy CSV");

    let mut config = AnalysisConfig::default();
    config.region_colors.insert("Norway".to_string(), "green".to_string());
    config.region_colors.insert("China".to_string(), "red".to_string());
    config.region_colors.insert("EU".to_string(), "blue".to_string());

    print_timeline(&timeline, &config);
}
