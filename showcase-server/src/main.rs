use std::path::PathBuf;

use actix_cors::Cors;
use actix_web::{HttpServer, App, web, middleware::Logger};
use clap::Parser;
use log::info;
use showcase_server::{catalog::Catalog, config::CatalogConfig, error::ConfigError, registry::CategoryRegistry, routes, types::MediaKind};

#[derive(Parser)]
#[clap(version, about="Read-only photo and video catalog for the gallery front-end")]
struct Args {
    #[clap(long, env = "HOST", default_value = "127.0.0.1")]
    host: String,

    #[clap(short, long, env = "PORT", default_value_t = 3001)]
    port: u16,

    /// Root holding the photo/ and video/ trees
    #[clap(long, env = "MEDIA_BASE_PATH", default_value = "PublicAssets")]
    media_base_path: PathBuf,

    /// JSON file replacing the built-in category taxonomy
    #[clap(long, env = "CATEGORIES_FILE")]
    categories: Option<PathBuf>,

    /// Do not create missing kind and category directories at startup
    #[clap(long)]
    no_init_layout: bool,
}

impl Args {
    fn catalog_config(&self) -> Result<CatalogConfig, ConfigError> {
        let registry = match &self.categories {
            Some(path) => CategoryRegistry::load(path)?,
            None => CategoryRegistry::builtin(),
        };
        Ok(CatalogConfig::new(self.media_base_path.clone(), registry))
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = args.catalog_config().map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err))?;
    if !args.no_init_layout {
        config.init_layout().await?;
    }

    info!("media root: {}", config.media_root().display());
    for kind in MediaKind::ALL {
        info!("{} categories: {}", kind, config.registry().keys(kind).join(", "));
    }
    for (route, description) in routes::ROUTES {
        info!("  {} - {}", route, description);
    }
    info!("listening on http://{}:{}", args.host, args.port);

    let catalog = Catalog::new(config);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::default()
                .allow_any_origin()
                .allowed_methods(["GET"])
                .allow_any_header()
            )
            .wrap(Logger::default())
            .app_data(web::Data::new(catalog.clone()))
            .configure(routes::configure)
    })
        .bind((args.host.as_str(), args.port))?
        .run()
        .await
}
