//! Shared test utilities and fixtures for reference registry tests

use std::path::Path;

pub mod loader_tests;
pub mod parser_tests;

/// A small OurAirports extract with the real column layout
pub const SAMPLE_CSV: &str = "\
\"id\",\"ident\",\"type\",\"name\",\"latitude_deg\",\"longitude_deg\",\"iso_country\",\"municipality\",\"iata_code\"
3632,\"KEWR\",\"large_airport\",\"Newark Liberty International Airport\",40.692501,-74.168701,\"US\",\"Newark, NJ\",\"EWR\"
5425,\"RJAA\",\"large_airport\",\"Narita International Airport\",35.764702,140.386002,\"JP\",\"Narita\",\"NRT\"
9999,\"\",\"closed\",\"Nameless strip\",0,0,\"\",\"\",\"\"
4242,\"egll\",\"large_airport\",\"London Heathrow Airport\",51.4706,-0.461941,\"GB\",\"London\",\"LHR\"
";

/// Write `contents` to `name` under `dir` and return the full path
pub fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}
