use airly_core::{
    AirQualityApi, AirlyClient, AirlyError, Config, Credential, CredentialStore,
    FileCredentialStore, FilterPolicy, GeoResolver, InstallationQuery, NominatimGeocoder,
    Pipeline, Resolution,
};
use clap::Parser;
use colored::Colorize;
use std::io::{self, Write};

use crate::{
    output,
    prompt::{InquirePrompter, Prompter},
};

const EXAMPLES: &str = "\
Examples:
  $ airly --installation 204
  $ airly --city Krakow
  $ airly -r";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "airly",
    version,
    about = "Air quality report for an Airly sensor installation",
    after_help = EXAMPLES
)]
pub struct Cli {
    /// Installation id; defaults to the configured installation (204).
    #[arg(short, long, conflicts_with = "city")]
    pub installation: Option<String>,

    /// Report on the installation nearest to this location.
    #[arg(short, long)]
    pub city: Option<String>,

    /// Delete the stored API key.
    #[arg(short, long)]
    pub reset: bool,

    /// Measurement filter: "names" keeps PM1/PM25/PM10, "trailing" drops the last three fields.
    #[arg(long, value_name = "POLICY")]
    pub filter: Option<FilterPolicy>,
}

/// Collaborators of one invocation.
pub struct App<'a> {
    pub store: &'a mut dyn CredentialStore,
    pub api: &'a dyn AirQualityApi,
    pub geocoder: &'a dyn GeoResolver,
    pub prompter: &'a mut dyn Prompter,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut store = FileCredentialStore::open()?;
        tracing::debug!(path = %store.path().display(), "loaded config");

        let api = AirlyClient::new(store.config().api_url());
        let geocoder = NominatimGeocoder::default();
        let mut prompter = InquirePrompter;

        let mut app =
            App { store: &mut store, api: &api, geocoder: &geocoder, prompter: &mut prompter };
        self.execute(&mut app, &mut io::stdout().lock()).await
    }

    pub async fn execute<W: Write>(self, app: &mut App<'_>, out: &mut W) -> anyhow::Result<()> {
        if app.store.is_first_run() {
            return onboard(app, out);
        }

        if self.reset {
            app.store.clear()?;
            writeln!(out, "API key deleted! Type `airly` to configure a new one.")?;
            return Ok(());
        }

        let credential = app.store.credential().ok_or(AirlyError::CredentialMissing)?;
        let query = self.query(app.store.config());
        let policy = self.filter.unwrap_or(app.store.config().filter);
        let pipeline = Pipeline::new(app.api, app.geocoder, policy);

        let id = match pipeline.resolve(&query, &credential).await? {
            Resolution::Resolved(id) => id,
            Resolution::Pending(request) => {
                let choice = app.prompter.choose_installation(&request)?;
                request.resume(choice)?
            }
        };

        writeln!(out, "Fetching data...")?;
        out.flush()?;

        let report = pipeline.report(&id, &credential).await?;

        writeln!(out, "{} Done:\n", "✔".green())?;
        output::print_report(out, &report)?;

        Ok(())
    }

    fn query(&self, config: &Config) -> InstallationQuery {
        match (&self.installation, &self.city) {
            (_, Some(city)) => InstallationQuery::ByCity(city.clone()),
            (Some(id), None) => InstallationQuery::ById(id.clone()),
            (None, None) => InstallationQuery::ById(config.default_installation().to_string()),
        }
    }
}

fn onboard<W: Write>(app: &mut App<'_>, out: &mut W) -> anyhow::Result<()> {
    writeln!(
        out,
        "Welcome to airly-cli. If you want to use this CLI tool, you need to paste your Airly API Key below."
    )?;
    writeln!(out, "You can get it here: https://bit.ly/2JAQGPK\n")?;
    out.flush()?;

    match app.prompter.api_key()?.and_then(Credential::new) {
        Some(key) => {
            app.store.set_credential(key)?;
            app.store.complete_first_run()?;
            writeln!(out, "API key successfully set! Type `airly --help` for help.")?;
        }
        None => {
            writeln!(out, "No API key entered. Run `airly` again when you have one.")?;
        }
    }

    Ok(())
}

/// Lower-cases long flag names so `--City` parses like `--city`.
///
/// Values and everything after a bare `--` are left untouched.
pub fn normalize_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut passthrough = false;

    args.into_iter()
        .map(|arg| {
            if passthrough || !arg.starts_with("--") {
                return arg;
            }
            if arg == "--" {
                passthrough = true;
                return arg;
            }
            match arg.split_once('=') {
                Some((flag, value)) => format!("{}={value}", flag.to_lowercase()),
                None => arg.to_lowercase(),
            }
        })
        .collect()
}

pub fn exit_status(result: &anyhow::Result<()>) -> u8 {
    if result.is_ok() { 0 } else { 1 }
}
