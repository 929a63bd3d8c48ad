//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::codec::Codec;
use crate::error::{Error, Result, ResultExt};
use crate::listing::{HttpListing, ListingOperation};
use crate::loader::{load_service, ServiceDefinition};
use crate::pagination::{ActionParameters, ContinuationToken, RawResult, ResourceCollection};
use crate::resources::{Ec2, Instance, KeyPair, ResourceKind, SecurityGroup, Volume};
use serde::Serialize;
use serde_json::json;
use std::io::{self, Write};
use std::sync::Arc;
use tracing::info;

/// Flags of the `list` command
#[derive(Debug, Clone, Default)]
struct ListOptions {
    pages: bool,
    max_pages: Option<usize>,
    capture: bool,
}

/// One output line in `--pages` mode
#[derive(Serialize)]
struct PageLine<'a, T> {
    page: usize,
    resources: Vec<T>,
    next_token: Option<&'a ContinuationToken>,
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, writing output to stdout
    pub async fn run(&self) -> Result<()> {
        self.run_to(&mut io::stdout()).await
    }

    /// Run the CLI command, writing output to `out`
    pub async fn run_to<W: Write>(&self, out: &mut W) -> Result<()> {
        match &self.cli.command {
            Commands::Collections => self.collections(out),
            Commands::Validate => self.validate(out),
            Commands::List {
                collection,
                params,
                page_size,
                pages,
                max_pages,
                capture,
            } => {
                let options = ListOptions {
                    pages: *pages,
                    max_pages: *max_pages,
                    capture: *capture,
                };
                self.list(out, collection, params, *page_size, &options)
                    .await
            }
        }
    }

    fn load_service(&self) -> Result<ServiceDefinition> {
        load_service(&self.cli.service)
    }

    /// Print every collection of the service
    fn collections(&self, out: &mut impl Write) -> Result<()> {
        let def = self.load_service()?;

        for collection in &def.collections {
            let line = json!({
                "name": collection.name,
                "action": collection.action,
                "method": collection.method,
                "paginated": collection.pagination.is_some(),
            });
            writeln!(out, "{}", serde_json::to_string(&line)?)?;
        }

        Ok(())
    }

    /// Validate the service definition
    fn validate(&self, out: &mut impl Write) -> Result<()> {
        let def = self.load_service()?;

        let line = json!({
            "type": "LOG",
            "log": {
                "level": "INFO",
                "message": format!(
                    "Service '{}' v{} is valid with {} collections",
                    def.name,
                    def.version,
                    def.collections.len()
                )
            }
        });
        writeln!(out, "{}", serde_json::to_string(&line)?)?;

        Ok(())
    }

    /// List a collection
    async fn list<W: Write>(
        &self,
        out: &mut W,
        name: &str,
        params: &[(String, String)],
        page_size: Option<u32>,
        options: &ListOptions,
    ) -> Result<()> {
        let def = self.load_service()?;
        let model = def.collection(name).ok_or_else(|| {
            let names: Vec<_> = def.collections.iter().map(|c| c.name.as_str()).collect();
            Error::config(format!(
                "Unknown collection '{name}'. Available: {}",
                names.join(", ")
            ))
        })?;

        let mut request = ActionParameters::new(&model.action);
        for (key, value) in params {
            request = request.param(key, value.as_str());
        }
        if let Some(size) = page_size {
            request = request.page_size(size);
        }

        let listing: Arc<dyn ListingOperation> = Arc::new(HttpListing::from_definition(&def)?);

        let result = if def.name == "ec2" {
            let ec2 = Ec2::new(Arc::clone(&listing));
            if name == KeyPair::COLLECTION {
                emit(out, ec2.collection::<KeyPair>(request), options).await
            } else if name == Instance::COLLECTION {
                emit(out, ec2.collection::<Instance>(request), options).await
            } else if name == Volume::COLLECTION {
                emit(out, ec2.collection::<Volume>(request), options).await
            } else if name == SecurityGroup::COLLECTION {
                emit(out, ec2.collection::<SecurityGroup>(request), options).await
            } else {
                emit(out, ResourceCollection::new(listing, request, Codec::raw()), options).await
            }
        } else {
            emit(out, ResourceCollection::new(listing, request, Codec::raw()), options).await
        };

        result.with_context(|| format!("Failed to list '{name}' from service '{}'", def.name))
    }
}

/// Write a collection as JSON lines, page by page
async fn emit<T, W>(
    out: &mut W,
    collection: ResourceCollection<T>,
    options: &ListOptions,
) -> Result<()>
where
    T: Serialize,
    W: Write,
{
    let mut pages = collection.pages();
    if options.capture {
        pages = pages.with_observer(Arc::new(capture_to_stderr));
    }

    let mut fetched = 0;
    let mut emitted = 0;

    while options.max_pages.map_or(true, |max| fetched < max) {
        let Some(page) = pages.next().await else {
            break;
        };
        let page = page?;
        fetched += 1;

        let resources = page.resources()?;
        emitted += resources.len();

        if options.pages {
            let line = PageLine {
                page: fetched,
                resources,
                next_token: page.next_token(),
            };
            writeln!(out, "{}", serde_json::to_string(&line)?)?;
        } else {
            for resource in &resources {
                writeln!(out, "{}", serde_json::to_string(resource)?)?;
            }
        }
    }

    info!(
        action = %collection.params().action,
        pages = fetched,
        resources = emitted,
        exhausted = pages.is_exhausted(),
        "Listing finished"
    );

    Ok(())
}

fn capture_to_stderr(result: &RawResult) {
    eprintln!("{}", serde_json::to_string(result).unwrap_or_default());
}
