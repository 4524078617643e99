use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use gcloud_gax::grpc::{Code, Status};
use gcloud_googleapis::spanner::admin::database::v1::{
    CreateDatabaseRequest, GetDatabaseDdlRequest, GetDatabaseRequest, UpdateDatabaseDdlRequest,
};
use gcloud_googleapis::spanner::admin::instance::v1::{
    CreateInstanceRequest, GetInstanceRequest, Instance,
};
use gcloud_spanner::admin::client::Client as AdminClient;
use gcloud_spanner::admin::AdminClientConfig;
use gcloud_spanner::client::{Client, ClientConfig};
use gcloud_spanner::mutation::insert_or_update;
use gcloud_spanner::statement::Statement;
use gcloud_spanner::value::CommitTimestamp;
use std::sync::Arc;

use super::{PetPredicate, PetService};
use crate::config::SpannerConfig;
use crate::models::Pet;

const PETS_TABLE: &str = "pets";

const CREATE_PETS_TABLE: &str = r#"
CREATE TABLE pets (
    id INT64 NOT NULL,
    data JSON NOT NULL,
    created_at TIMESTAMP NOT NULL OPTIONS (allow_commit_timestamp=true),
) PRIMARY KEY (id)
"#;

/// Pet store backed by a Cloud Spanner `pets` table
///
/// Each row keeps the full pet document as JSON next to its id. Writes are
/// upserts keyed on the id, so adding a pet with an existing id replaces it.
#[derive(Clone)]
pub struct SpannerPetService {
    inner: Arc<Client>,
}

impl SpannerPetService {
    /// Connect to Spanner, provisioning the instance, database and table first.
    ///
    /// The gcloud-spanner library picks up `SPANNER_EMULATOR_HOST` on its own
    /// and talks to the emulator when it is set.
    pub async fn from_config(config: &SpannerConfig) -> Result<Self> {
        auto_provision(config).await?;

        let database_path = database_path(config);

        match &config.emulator_host {
            Some(host) => tracing::info!("Connecting to Spanner emulator at: {}", host),
            None => tracing::info!("Connecting to production Spanner"),
        }

        let client = Client::new(&database_path, ClientConfig::default())
            .await
            .context("Failed to create Spanner client")?;

        tracing::info!(
            "Successfully connected to Spanner database: {}",
            database_path
        );

        Ok(Self {
            inner: Arc::new(client),
        })
    }
}

#[async_trait]
impl PetService for SpannerPetService {
    async fn get_all(&self) -> Result<Vec<Pet>> {
        let statement = Statement::new("SELECT data FROM pets ORDER BY id ASC");

        let mut tx = self.inner
            .single()
            .await
            .context("Failed to create read transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to query pets from Spanner")?;

        let mut pets = Vec::new();
        while let Some(row) = result_set.next().await? {
            let data: String = row.column_by_name("data")?;
            let pet: Pet = serde_json::from_str(&data)
                .context("Failed to deserialize stored pet")?;
            pets.push(pet);
        }

        tracing::debug!("Read {} pets", pets.len());
        Ok(pets)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Pet>> {
        let mut statement = Statement::new("SELECT data FROM pets WHERE id = @id");
        statement.add_param("id", &i64::from(id));

        let mut tx = self.inner
            .single()
            .await
            .context("Failed to create read transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to query pet from Spanner")?;

        match result_set.next().await? {
            Some(row) => {
                let data: String = row.column_by_name("data")?;
                let pet = serde_json::from_str(&data)
                    .context("Failed to deserialize stored pet")?;
                Ok(Some(pet))
            }
            None => {
                tracing::debug!("Pet not found with id: {}", id);
                Ok(None)
            }
        }
    }

    // Arbitrary predicates cannot be pushed down to SQL, so filter client-side.
    async fn find_one(&self, predicate: PetPredicate<'_>) -> Result<Option<Pet>> {
        let pets = self.get_all().await?;
        Ok(pets.into_iter().find(|pet| predicate(pet)))
    }

    async fn add(&self, pet: Pet) -> Result<Pet> {
        let id = i64::from(pet.id);
        let data = serde_json::to_string(&pet)
            .context("Failed to serialize pet")?;

        let mutation = insert_or_update(
            PETS_TABLE,
            &["id", "data", "created_at"],
            &[&id, &data, &CommitTimestamp::new()],
        );

        self.inner
            .apply(vec![mutation])
            .await
            .context("Failed to write pet to Spanner")?;

        tracing::debug!("Stored pet with id: {}", pet.id);
        Ok(pet)
    }

    async fn health_check(&self) -> Result<()> {
        let statement = Statement::new("SELECT 1");

        let mut tx = self.inner
            .single()
            .await
            .context("Failed to create health check transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to execute health check query")?;

        if result_set.next().await?.is_some() {
            tracing::debug!("Health check query succeeded");
            Ok(())
        } else {
            Err(anyhow::anyhow!("Health check query returned no results"))
        }
    }
}

fn database_path(config: &SpannerConfig) -> String {
    format!(
        "projects/{}/instances/{}/databases/{}",
        config.project, config.instance, config.database
    )
}

/// Create the Spanner instance, database and `pets` table when missing
async fn auto_provision(config: &SpannerConfig) -> Result<()> {
    tracing::info!("Starting auto-provisioning checks...");

    let admin_client = AdminClient::new(AdminClientConfig::default())
        .await
        .context("Failed to create Spanner admin client")?;

    let project_path = format!("projects/{}", config.project);
    let instance_path = format!("{}/instances/{}", project_path, config.instance);
    let database_path = database_path(config);

    ensure_instance_exists(&admin_client, config, &project_path, &instance_path).await?;
    ensure_database_exists(&admin_client, &instance_path, &database_path).await?;
    ensure_table_exists(&admin_client, &database_path).await?;

    tracing::info!("Auto-provisioning complete");
    Ok(())
}

/// What an admin `get_*` lookup says about a resource
#[derive(Debug, PartialEq, Eq)]
enum Existence {
    Present,
    Absent,
}

fn existence<T>(kind: &str, lookup: std::result::Result<T, Status>) -> Result<Existence> {
    match lookup {
        Ok(_) => Ok(Existence::Present),
        Err(status) if status.code() == Code::NotFound => Ok(Existence::Absent),
        Err(status) => bail!("Failed to check {} existence: {}", kind, status.message()),
    }
}

fn instance_config_path(config: &SpannerConfig, project_path: &str) -> String {
    let instance_config = if config.emulator_host.is_some() {
        "emulator-config"
    } else {
        "regional-us-central1"
    };
    format!("{}/instanceConfigs/{}", project_path, instance_config)
}

async fn ensure_instance_exists(
    admin_client: &AdminClient,
    config: &SpannerConfig,
    project_path: &str,
    instance_path: &str,
) -> Result<()> {
    let lookup = admin_client
        .instance()
        .get_instance(
            GetInstanceRequest {
                name: instance_path.to_string(),
                field_mask: None,
            },
            None,
        )
        .await;

    if existence("instance", lookup)? == Existence::Present {
        tracing::info!("Instance already exists: {}", instance_path);
        return Ok(());
    }

    tracing::info!("Instance not found, creating: {}", instance_path);

    let instance = Instance {
        name: instance_path.to_string(),
        config: instance_config_path(config, project_path),
        display_name: format!("{} instance", config.instance),
        node_count: 1,
        ..Default::default()
    };

    admin_client
        .instance()
        .create_instance(
            CreateInstanceRequest {
                parent: project_path.to_string(),
                instance_id: config.instance.clone(),
                instance: Some(instance),
            },
            None,
        )
        .await
        .context("Failed to start instance creation")?
        .wait(None)
        .await
        .context("Failed to create instance")?;

    tracing::info!("Instance created successfully: {}", instance_path);
    Ok(())
}

async fn ensure_database_exists(
    admin_client: &AdminClient,
    instance_path: &str,
    database_path: &str,
) -> Result<()> {
    let lookup = admin_client
        .database()
        .get_database(
            GetDatabaseRequest {
                name: database_path.to_string(),
            },
            None,
        )
        .await;

    if existence("database", lookup)? == Existence::Present {
        tracing::info!("Database already exists: {}", database_path);
        return Ok(());
    }

    tracing::info!("Database not found, creating: {}", database_path);

    let database_id = database_path
        .rsplit('/')
        .next()
        .filter(|id| !id.is_empty())
        .context("Invalid database path")?;

    admin_client
        .database()
        .create_database(
            CreateDatabaseRequest {
                parent: instance_path.to_string(),
                create_statement: format!("CREATE DATABASE `{}`", database_id),
                extra_statements: vec![],
                encryption_config: None,
                database_dialect: 1, // Google Standard SQL
                proto_descriptors: vec![],
            },
            None,
        )
        .await
        .context("Failed to start database creation")?
        .wait(None)
        .await
        .context("Failed to create database")?;

    tracing::info!("Database created successfully: {}", database_path);
    Ok(())
}

fn has_pets_table(statements: &[String]) -> bool {
    statements
        .iter()
        .any(|stmt| stmt.contains("CREATE TABLE pets") || stmt.contains("CREATE TABLE `pets`"))
}

async fn ensure_table_exists(admin_client: &AdminClient, database_path: &str) -> Result<()> {
    let get_ddl_request = GetDatabaseDdlRequest {
        database: database_path.to_string(),
    };

    let ddl_response = admin_client
        .database()
        .get_database_ddl(get_ddl_request, None)
        .await
        .context("Failed to get database DDL")?;

    if has_pets_table(&ddl_response.into_inner().statements) {
        tracing::info!("Table '{}' already exists", PETS_TABLE);
        return Ok(());
    }

    tracing::info!("Table '{}' not found, creating...", PETS_TABLE);

    let update_request = UpdateDatabaseDdlRequest {
        database: database_path.to_string(),
        statements: vec![CREATE_PETS_TABLE.trim().to_string()],
        operation_id: String::new(),
        proto_descriptors: vec![],
        throughput_mode: false,
    };

    let mut operation = admin_client
        .database()
        .update_database_ddl(update_request, None)
        .await
        .context("Failed to start table creation")?;

    operation
        .wait(None)
        .await
        .context("Failed to create table")?;

    tracing::info!("Table '{}' created successfully", PETS_TABLE);
    Ok(())
}
