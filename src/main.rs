//! Command-line interface for pulsar-admin
//!
//! # Usage Examples
//!
//! ## Inspecting messages
//! ```bash
//! # Peek at least five messages; batched entries may yield more
//! pulsar-admin subscriptions peek persistent://public/default/events reader -n 5
//!
//! # Fetch the message stored at ledger 12, entry 4
//! pulsar-admin subscriptions get-message events --ledger-id 12 --entry-id 4
//! ```
//!
//! ## Cursor management
//! ```bash
//! pulsar-admin subscriptions reset-cursor events reader --message-id 12:4:-1:-1
//! pulsar-admin subscriptions expire events --expire-secs 3600
//! ```
//!
//! ## Sinks
//! ```bash
//! pulsar-admin sinks create --config-file es-sink.json --archive builtin://elastic_search
//! pulsar-admin sinks status public default es --instance-id 0
//! ```
//!
//! ## Sources
//! ```bash
//! pulsar-admin sources create --config-file kafka-source.json --url file:///opt/connectors/kafka.nar
//! pulsar-admin sources restart public default kafka-in
//! ```
//!
//! Every command prints its result as JSON on stdout.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use pulsar_admin::{load_sink_config, load_source_config, ConnectionOpts};
use pulsar_admin_client::PulsarAdmin;
use pulsar_admin_types::{MessageId, ResourceQuota, TenantData, TopicName, UpdateOptions};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pulsar-admin")]
#[command(about = "Administer an Apache Pulsar cluster over its REST API")]
#[command(long_about = None)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Subscriptions of a topic, peek and get-message
    Subscriptions {
        #[command(subcommand)]
        command: SubscriptionCommand,
    },

    /// Tenant administration
    Tenants {
        #[command(subcommand)]
        command: TenantCommand,
    },

    /// Default and per-bundle resource quotas
    ResourceQuotas {
        #[command(subcommand)]
        command: ResourceQuotaCommand,
    },

    /// Broker statistics
    BrokerStats {
        #[command(subcommand)]
        command: BrokerStatsCommand,
    },

    /// Sink connectors
    Sinks {
        #[command(subcommand)]
        command: SinkCommand,
    },

    /// Source connectors
    Sources {
        #[command(subcommand)]
        command: SourceCommand,
    },
}

#[derive(Subcommand)]
enum SubscriptionCommand {
    /// List the subscriptions of a topic
    List { topic: String },

    /// Create a subscription
    Create {
        topic: String,
        subscription: String,

        /// Initial position: "latest" or ledger:entry[:partition[:batch]]
        #[arg(long, default_value = "latest")]
        message_id: String,
    },

    /// Delete a subscription
    Delete {
        topic: String,
        subscription: String,

        /// Disconnect connected consumers first
        #[arg(long)]
        force: bool,
    },

    /// Peek messages without moving the cursor
    Peek {
        topic: String,
        subscription: String,

        /// Minimum number of messages to peek
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,
    },

    /// Fetch one message by ledger and entry id
    GetMessage {
        topic: String,

        #[arg(long)]
        ledger_id: i64,

        #[arg(long)]
        entry_id: i64,
    },

    /// Move the cursor to a message id or a publish timestamp
    ResetCursor {
        topic: String,
        subscription: String,

        #[arg(
            long,
            conflicts_with = "timestamp",
            required_unless_present = "timestamp"
        )]
        message_id: Option<String>,

        /// Milliseconds since the epoch
        #[arg(long)]
        timestamp: Option<i64>,
    },

    /// Skip messages on a subscription
    Skip {
        topic: String,
        subscription: String,

        #[arg(short = 'n', long)]
        count: i64,
    },

    /// Skip the whole backlog of a subscription
    ClearBacklog { topic: String, subscription: String },

    /// Expire messages older than the given age
    Expire {
        topic: String,

        /// Only this subscription (default: all subscriptions)
        #[arg(long)]
        subscription: Option<String>,

        #[arg(long)]
        expire_secs: i64,
    },
}

#[derive(Subcommand)]
enum TenantCommand {
    List,
    Get {
        name: String,
    },
    Create {
        #[command(flatten)]
        tenant: TenantArgs,
    },
    Update {
        #[command(flatten)]
        tenant: TenantArgs,
    },
    Delete {
        name: String,
    },
}

#[derive(Args)]
struct TenantArgs {
    name: String,

    /// Comma-separated admin roles
    #[arg(long, value_delimiter = ',')]
    admin_roles: Vec<String>,

    /// Comma-separated clusters the tenant may use
    #[arg(long, value_delimiter = ',')]
    allowed_clusters: Vec<String>,
}

impl From<TenantArgs> for TenantData {
    fn from(args: TenantArgs) -> Self {
        TenantData {
            name: args.name,
            admin_roles: args.admin_roles,
            allowed_clusters: args.allowed_clusters,
        }
    }
}

#[derive(Subcommand)]
enum ResourceQuotaCommand {
    /// Show the default quota, or a bundle's quota
    Get {
        #[command(flatten)]
        bundle: BundleArgs,
    },

    /// Set the default quota, or a bundle's quota
    Set {
        #[command(flatten)]
        bundle: BundleArgs,

        #[command(flatten)]
        quota: QuotaArgs,
    },

    /// Drop a bundle's quota so the default applies again
    Reset {
        /// tenant/namespace
        #[arg(long)]
        namespace: String,

        #[arg(long)]
        bundle: String,
    },
}

#[derive(Args)]
struct BundleArgs {
    /// tenant/namespace
    #[arg(long, requires = "bundle")]
    namespace: Option<String>,

    /// Bundle range, e.g. 0x00000000_0xffffffff
    #[arg(long, requires = "namespace")]
    bundle: Option<String>,
}

#[derive(Args)]
struct QuotaArgs {
    #[arg(long, default_value = "40")]
    msg_rate_in: f64,

    #[arg(long, default_value = "120")]
    msg_rate_out: f64,

    /// Bytes per second
    #[arg(long, default_value = "100000")]
    bandwidth_in: f64,

    /// Bytes per second
    #[arg(long, default_value = "400000")]
    bandwidth_out: f64,

    /// Megabytes
    #[arg(long, default_value = "100")]
    memory: f64,

    /// Pin the quota so the load manager leaves it alone
    #[arg(long)]
    fixed: bool,
}

impl From<QuotaArgs> for ResourceQuota {
    fn from(args: QuotaArgs) -> Self {
        ResourceQuota {
            msg_rate_in: args.msg_rate_in,
            msg_rate_out: args.msg_rate_out,
            bandwidth_in: args.bandwidth_in,
            bandwidth_out: args.bandwidth_out,
            memory: args.memory,
            dynamic: !args.fixed,
        }
    }
}

#[derive(Subcommand)]
enum BrokerStatsCommand {
    Metrics,
    Mbeans,
    Topics,
    LoadReport,
    AllocatorStats { allocator: String },
}

#[derive(Subcommand)]
enum SinkCommand {
    List {
        tenant: String,
        namespace: String,
    },
    Get {
        #[command(flatten)]
        sink: ConnectorArgs,
    },
    /// Create a sink from a JSON sink config
    Create {
        #[command(flatten)]
        package: PackageArgs,
    },
    /// Update a sink from a JSON sink config
    Update {
        #[command(flatten)]
        package: PackageArgs,

        #[arg(long)]
        update_auth_data: bool,
    },
    Delete {
        #[command(flatten)]
        sink: ConnectorArgs,
    },
    Status {
        #[command(flatten)]
        sink: ConnectorArgs,

        #[arg(long)]
        instance_id: Option<i32>,
    },
    Restart {
        #[command(flatten)]
        sink: ConnectorArgs,

        #[arg(long)]
        instance_id: Option<i32>,
    },
    Stop {
        #[command(flatten)]
        sink: ConnectorArgs,

        #[arg(long)]
        instance_id: Option<i32>,
    },
    Start {
        #[command(flatten)]
        sink: ConnectorArgs,

        #[arg(long)]
        instance_id: Option<i32>,
    },
    /// List the connectors bundled with the cluster
    Builtin,
    ReloadBuiltin,
}

#[derive(Subcommand)]
enum SourceCommand {
    List {
        tenant: String,
        namespace: String,
    },
    Get {
        #[command(flatten)]
        source: ConnectorArgs,
    },
    /// Create a source from a JSON source config
    Create {
        #[command(flatten)]
        package: PackageArgs,
    },
    /// Update a source from a JSON source config
    Update {
        #[command(flatten)]
        package: PackageArgs,

        #[arg(long)]
        update_auth_data: bool,
    },
    Delete {
        #[command(flatten)]
        source: ConnectorArgs,
    },
    Status {
        #[command(flatten)]
        source: ConnectorArgs,

        #[arg(long)]
        instance_id: Option<i32>,
    },
    Restart {
        #[command(flatten)]
        source: ConnectorArgs,

        #[arg(long)]
        instance_id: Option<i32>,
    },
    Stop {
        #[command(flatten)]
        source: ConnectorArgs,

        #[arg(long)]
        instance_id: Option<i32>,
    },
    Start {
        #[command(flatten)]
        source: ConnectorArgs,

        #[arg(long)]
        instance_id: Option<i32>,
    },
    Builtin,
    ReloadBuiltin,
}

#[derive(Args)]
struct ConnectorArgs {
    tenant: String,
    namespace: String,
    name: String,
}

#[derive(Args)]
struct PackageArgs {
    /// JSON file holding the sink or source config
    #[arg(long)]
    config_file: PathBuf,

    /// Local connector archive, or builtin://<connector>
    #[arg(long, conflicts_with = "url")]
    archive: Option<PathBuf>,

    /// http:// or file:// URL the worker downloads the archive from
    #[arg(long)]
    url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.connection.to_client_config()?;
    let admin = PulsarAdmin::new(&config).context("Failed to build admin client")?;

    match cli.command {
        Commands::Subscriptions { command } => run_subscriptions(&admin, command).await,
        Commands::Tenants { command } => run_tenants(&admin, command).await,
        Commands::ResourceQuotas { command } => run_resource_quotas(&admin, command).await,
        Commands::BrokerStats { command } => run_broker_stats(&admin, command).await,
        Commands::Sinks { command } => run_sinks(&admin, command).await,
        Commands::Sources { command } => run_sources(&admin, command).await,
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_topic(topic: &str) -> anyhow::Result<TopicName> {
    TopicName::parse(topic).with_context(|| format!("Invalid topic '{topic}'"))
}

fn parse_position(message_id: &str) -> anyhow::Result<MessageId> {
    if message_id.eq_ignore_ascii_case("latest") {
        return Ok(MessageId::latest());
    }
    MessageId::parse(message_id).with_context(|| format!("Invalid message id '{message_id}'"))
}

async fn run_subscriptions(
    admin: &PulsarAdmin,
    command: SubscriptionCommand,
) -> anyhow::Result<()> {
    let subscriptions = admin.subscriptions();

    match command {
        SubscriptionCommand::List { topic } => {
            let topic = parse_topic(&topic)?;
            print_json(&subscriptions.list(&topic).await?)
        }
        SubscriptionCommand::Create {
            topic,
            subscription,
            message_id,
        } => {
            let topic = parse_topic(&topic)?;
            let position = parse_position(&message_id)?;
            subscriptions.create(&topic, &subscription, position).await?;
            tracing::info!("Created subscription {subscription} on {topic}");
            Ok(())
        }
        SubscriptionCommand::Delete {
            topic,
            subscription,
            force,
        } => {
            let topic = parse_topic(&topic)?;
            if force {
                subscriptions.force_delete(&topic, &subscription).await?;
            } else {
                subscriptions.delete(&topic, &subscription).await?;
            }
            tracing::info!("Deleted subscription {subscription} on {topic}");
            Ok(())
        }
        SubscriptionCommand::Peek {
            topic,
            subscription,
            count,
        } => {
            let topic = parse_topic(&topic)?;
            let messages = subscriptions
                .peek_messages(&topic, &subscription, count)
                .await
                .with_context(|| format!("Failed to peek {topic}/{subscription}"))?;
            print_json(&messages)
        }
        SubscriptionCommand::GetMessage {
            topic,
            ledger_id,
            entry_id,
        } => {
            let topic = parse_topic(&topic)?;
            let message = subscriptions
                .get_message_by_id(&topic, ledger_id, entry_id)
                .await
                .with_context(|| format!("Failed to get message {ledger_id}:{entry_id}"))?;
            print_json(&message)
        }
        SubscriptionCommand::ResetCursor {
            topic,
            subscription,
            message_id,
            timestamp,
        } => {
            let topic = parse_topic(&topic)?;
            match (message_id, timestamp) {
                (Some(id), _) => {
                    let id = parse_position(&id)?;
                    subscriptions
                        .reset_cursor_to_message_id(&topic, &subscription, id)
                        .await?;
                }
                (None, Some(ts)) => {
                    subscriptions
                        .reset_cursor_to_timestamp(&topic, &subscription, ts)
                        .await?;
                }
                (None, None) => anyhow::bail!("Either --message-id or --timestamp is required"),
            }
            Ok(())
        }
        SubscriptionCommand::Skip {
            topic,
            subscription,
            count,
        } => {
            let topic = parse_topic(&topic)?;
            subscriptions
                .skip_messages(&topic, &subscription, count)
                .await?;
            Ok(())
        }
        SubscriptionCommand::ClearBacklog {
            topic,
            subscription,
        } => {
            let topic = parse_topic(&topic)?;
            subscriptions.clear_backlog(&topic, &subscription).await?;
            Ok(())
        }
        SubscriptionCommand::Expire {
            topic,
            subscription,
            expire_secs,
        } => {
            let topic = parse_topic(&topic)?;
            match subscription {
                Some(subscription) => {
                    subscriptions
                        .expire_messages(&topic, &subscription, expire_secs)
                        .await?
                }
                None => subscriptions.expire_all_messages(&topic, expire_secs).await?,
            }
            Ok(())
        }
    }
}

async fn run_tenants(admin: &PulsarAdmin, command: TenantCommand) -> anyhow::Result<()> {
    let tenants = admin.tenants();

    match command {
        TenantCommand::List => print_json(&tenants.list().await?),
        TenantCommand::Get { name } => print_json(&tenants.get(&name).await?),
        TenantCommand::Create { tenant } => {
            let data = TenantData::from(tenant);
            tenants.create(&data).await?;
            tracing::info!("Created tenant {}", data.name);
            Ok(())
        }
        TenantCommand::Update { tenant } => {
            tenants.update(&TenantData::from(tenant)).await?;
            Ok(())
        }
        TenantCommand::Delete { name } => {
            tenants.delete(&name).await?;
            Ok(())
        }
    }
}

async fn run_resource_quotas(
    admin: &PulsarAdmin,
    command: ResourceQuotaCommand,
) -> anyhow::Result<()> {
    let quotas = admin.resource_quotas();

    match command {
        ResourceQuotaCommand::Get { bundle } => match (bundle.namespace, bundle.bundle) {
            (Some(namespace), Some(bundle)) => {
                print_json(&quotas.get_namespace_bundle(&namespace, &bundle).await?)
            }
            _ => print_json(&quotas.get_default().await?),
        },
        ResourceQuotaCommand::Set { bundle, quota } => {
            let quota = ResourceQuota::from(quota);
            match (bundle.namespace, bundle.bundle) {
                (Some(namespace), Some(bundle)) => {
                    quotas
                        .set_namespace_bundle(&namespace, &bundle, &quota)
                        .await?
                }
                _ => quotas.set_default(&quota).await?,
            }
            Ok(())
        }
        ResourceQuotaCommand::Reset { namespace, bundle } => {
            quotas.reset_namespace_bundle(&namespace, &bundle).await?;
            Ok(())
        }
    }
}

async fn run_broker_stats(
    admin: &PulsarAdmin,
    command: BrokerStatsCommand,
) -> anyhow::Result<()> {
    let stats = admin.broker_stats();

    match command {
        BrokerStatsCommand::Metrics => print_json(&stats.metrics().await?),
        BrokerStatsCommand::Mbeans => print_json(&stats.mbeans().await?),
        BrokerStatsCommand::Topics => {
            // Already JSON
            println!("{}", stats.topics().await?);
            Ok(())
        }
        BrokerStatsCommand::LoadReport => print_json(&stats.load_report().await?),
        BrokerStatsCommand::AllocatorStats { allocator } => {
            print_json(&stats.allocator_stats(&allocator).await?)
        }
    }
}

async fn run_sinks(admin: &PulsarAdmin, command: SinkCommand) -> anyhow::Result<()> {
    let sinks = admin.sinks();

    match command {
        SinkCommand::List { tenant, namespace } => {
            print_json(&sinks.list(&tenant, &namespace).await?)
        }
        SinkCommand::Get { sink } => {
            print_json(&sinks.get(&sink.tenant, &sink.namespace, &sink.name).await?)
        }
        SinkCommand::Create { package } => {
            let config = load_sink_config(&package.config_file)?;
            match &package.url {
                Some(url) => sinks.create_with_url(&config, url).await?,
                None => sinks.create(&config, package.archive.as_deref()).await?,
            }
            tracing::info!(
                "Created sink {}/{}/{}",
                config.tenant,
                config.namespace,
                config.name
            );
            Ok(())
        }
        SinkCommand::Update {
            package,
            update_auth_data,
        } => {
            let config = load_sink_config(&package.config_file)?;
            let options = UpdateOptions { update_auth_data };
            match &package.url {
                Some(url) => {
                    sinks
                        .update_with_url(&config, url, Some(&options))
                        .await?
                }
                None => {
                    sinks
                        .update(&config, package.archive.as_deref(), Some(&options))
                        .await?
                }
            }
            Ok(())
        }
        SinkCommand::Delete { sink } => {
            sinks
                .delete(&sink.tenant, &sink.namespace, &sink.name)
                .await?;
            Ok(())
        }
        SinkCommand::Status { sink, instance_id } => match instance_id {
            Some(id) => print_json(
                &sinks
                    .status_with_id(&sink.tenant, &sink.namespace, &sink.name, id)
                    .await?,
            ),
            None => print_json(
                &sinks
                    .status(&sink.tenant, &sink.namespace, &sink.name)
                    .await?,
            ),
        },
        SinkCommand::Restart { sink, instance_id } => {
            let ConnectorArgs {
                tenant,
                namespace,
                name,
            } = sink;
            match instance_id {
                Some(id) => sinks.restart_with_id(&tenant, &namespace, &name, id).await?,
                None => sinks.restart(&tenant, &namespace, &name).await?,
            }
            Ok(())
        }
        SinkCommand::Stop { sink, instance_id } => {
            let ConnectorArgs {
                tenant,
                namespace,
                name,
            } = sink;
            match instance_id {
                Some(id) => sinks.stop_with_id(&tenant, &namespace, &name, id).await?,
                None => sinks.stop(&tenant, &namespace, &name).await?,
            }
            Ok(())
        }
        SinkCommand::Start { sink, instance_id } => {
            let ConnectorArgs {
                tenant,
                namespace,
                name,
            } = sink;
            match instance_id {
                Some(id) => sinks.start_with_id(&tenant, &namespace, &name, id).await?,
                None => sinks.start(&tenant, &namespace, &name).await?,
            }
            Ok(())
        }
        SinkCommand::Builtin => print_json(&sinks.builtin_sinks().await?),
        SinkCommand::ReloadBuiltin => {
            sinks.reload_builtin_sinks().await?;
            Ok(())
        }
    }
}

async fn run_sources(admin: &PulsarAdmin, command: SourceCommand) -> anyhow::Result<()> {
    let sources = admin.sources();

    match command {
        SourceCommand::List { tenant, namespace } => {
            print_json(&sources.list(&tenant, &namespace).await?)
        }
        SourceCommand::Get { source } => print_json(
            &sources
                .get(&source.tenant, &source.namespace, &source.name)
                .await?,
        ),
        SourceCommand::Create { package } => {
            let config = load_source_config(&package.config_file)?;
            match &package.url {
                Some(url) => sources.create_with_url(&config, url).await?,
                None => sources.create(&config, package.archive.as_deref()).await?,
            }
            tracing::info!(
                "Created source {}/{}/{}",
                config.tenant,
                config.namespace,
                config.name
            );
            Ok(())
        }
        SourceCommand::Update {
            package,
            update_auth_data,
        } => {
            let config = load_source_config(&package.config_file)?;
            let options = UpdateOptions { update_auth_data };
            match &package.url {
                Some(url) => {
                    sources
                        .update_with_url(&config, url, Some(&options))
                        .await?
                }
                None => {
                    sources
                        .update(&config, package.archive.as_deref(), Some(&options))
                        .await?
                }
            }
            Ok(())
        }
        SourceCommand::Delete { source } => {
            sources
                .delete(&source.tenant, &source.namespace, &source.name)
                .await?;
            Ok(())
        }
        SourceCommand::Status {
            source,
            instance_id,
        } => match instance_id {
            Some(id) => print_json(
                &sources
                    .status_with_id(&source.tenant, &source.namespace, &source.name, id)
                    .await?,
            ),
            None => print_json(
                &sources
                    .status(&source.tenant, &source.namespace, &source.name)
                    .await?,
            ),
        },
        SourceCommand::Restart {
            source,
            instance_id,
        } => {
            let ConnectorArgs {
                tenant,
                namespace,
                name,
            } = source;
            match instance_id {
                Some(id) => {
                    sources
                        .restart_with_id(&tenant, &namespace, &name, id)
                        .await?
                }
                None => sources.restart(&tenant, &namespace, &name).await?,
            }
            Ok(())
        }
        SourceCommand::Stop {
            source,
            instance_id,
        } => {
            let ConnectorArgs {
                tenant,
                namespace,
                name,
            } = source;
            match instance_id {
                Some(id) => sources.stop_with_id(&tenant, &namespace, &name, id).await?,
                None => sources.stop(&tenant, &namespace, &name).await?,
            }
            Ok(())
        }
        SourceCommand::Start {
            source,
            instance_id,
        } => {
            let ConnectorArgs {
                tenant,
                namespace,
                name,
            } = source;
            match instance_id {
                Some(id) => sources.start_with_id(&tenant, &namespace, &name, id).await?,
                None => sources.start(&tenant, &namespace, &name).await?,
            }
            Ok(())
        }
        SourceCommand::Builtin => print_json(&sources.builtin_sources().await?),
        SourceCommand::ReloadBuiltin => {
            sources.reload_builtin_sources().await?;
            Ok(())
        }
    }
}
