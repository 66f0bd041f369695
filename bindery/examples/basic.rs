//! Basic example of the Bindery IoC container.

use std::sync::Arc;

use bindery::prelude::*;

// === Define your traits and types ===

trait Logger: Send + Sync {
    fn log(&self, msg: &str);
}

struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, msg: &str) {
        println!("[LOG] {msg}");
    }
}

struct Config {
    database_url: String,
}

struct Database {
    url: String,
    logger: Arc<dyn Logger>,
}

impl Database {
    fn query(&self, sql: &str) -> String {
        self.logger.log(&format!("Executing: {sql}"));
        format!("Results from {}", self.url)
    }
}

struct UserRepository {
    db: Arc<Database>,
}

impl UserRepository {
    fn find_user(&self, id: u64) -> String {
        self.db.query(&format!("SELECT * FROM users WHERE id = {id}"))
    }
}

fn main() -> Result<()> {
    // Initialize tracing (logging)
    tracing_subscriber::fmt()
        .with_env_filter("bindery=debug")
        .init();

    let container = Container::new();

    // Config — shared factory binding
    container.singleton(
        "config",
        Some(Concrete::factory(|_| {
            Ok(Config { database_url: "postgres://localhost/myapp".to_string() })
        })),
    );

    // Logger — the "logger" interface gets a concrete factory
    container.register_type(TypeDescriptor::interface("logger"));
    container.singleton(
        "logger",
        Some(Concrete::factory(|_| Ok(Arc::new(ConsoleLogger) as Arc<dyn Logger>))),
    );
    container.alias("logger", "log")?;

    // Database — autowired from its descriptor (depends on config + logger)
    container.register_type(TypeDescriptor::new(
        "db",
        [
            Parameter::typed("config", "config"),
            Parameter::typed("logger", "logger"),
        ],
        |mut args| {
            let config: Arc<Config> = args.take()?;
            let logger: Arc<Arc<dyn Logger>> = args.take()?;
            Ok(Database {
                url: config.database_url.clone(),
                logger: (*logger).clone(),
            })
        },
    ));
    container.singleton("db", None);

    // UserRepository — transient, new instance per make
    container.register_type(TypeDescriptor::new(
        "user.repository",
        [Parameter::typed("db", "db")],
        |mut args| Ok(UserRepository { db: args.take()? }),
    ));

    let repo = container.make_as::<UserRepository>("user.repository")?;
    println!("{}", repo.find_user(42));

    // The alias resolves to the same cached logger
    let via_alias = container.make_as::<Arc<dyn Logger>>("log")?;
    via_alias.log("resolved through alias");

    println!("{container:?}");
    Ok(())
}
