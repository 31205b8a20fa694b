use clap::Parser;

/// This is a survey dashboard program: it computes what every chart of a dashboard shows.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The file containing the description of the dashboard (JSON format).
    /// For more information about the file format, read the documentation of the survey_filter crate.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,
    /// (file path) A reference file containing a snapshot of the dashboard in JSON format. If provided,
    /// surveydash will check that the computed snapshot matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the snapshot of the dashboard will be written in JSON
    /// format to the given location. By default it is printed on the standard output.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path or empty) If specified, builds a simple dashboard directly from this data file,
    /// without configuration file. One bar chart is created for each of the --fields.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default json) The type of the input: json, csv or xlsx.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (list of field names) The fields to chart when using --input.
    #[clap(long, value_parser)]
    pub fields: Option<Vec<String>>,

    /// (field name) The field holding the survey round when using --input.
    #[clap(long, value_parser)]
    pub round_field: Option<String>,

    /// (round value, optional) Restricts the dashboard to one survey round.
    #[clap(long, value_parser)]
    pub round: Option<String>,

    /// When using an Excel file with --input, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (file path) If specified, the records of the first source are written to this location
    /// as a JSON array.
    #[clap(long, value_parser)]
    pub export_json: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
