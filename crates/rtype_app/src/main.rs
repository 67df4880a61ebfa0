//! # rtype_app: R-Type proof-of-concept demo
//!
//! Runs two independent demos one after the other:
//!
//! 1. Movement: two entities with a position and a velocity are advanced by
//!    the fixed-timestep tick loop.
//! 2. Networking: a UDP socket sends a greeting to itself and waits for it.
//!
//! Socket failures are logged and do not abort the process.

use anyhow::Result;
use rtype_app::config::AppConfig;
use rtype_app::registry::Registry;
use rtype_app::tick::TickLoop;
use rtype_component::{Position, Velocity};
use rtype_net::{Datagram, UdpEndpoint};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("rtype_app=info".parse()?)
                .add_directive("rtype_net=info".parse()?),
        )
        .init();

    info!("R-Type PoC: ECS and networking demo");

    let config = AppConfig::default();

    run_movement_demo(&config).await;
    run_socket_demo(&config).await;

    info!("R-Type PoC completed");
    Ok(())
}

/// Spawn the player and one enemy, then tick them for the configured number
/// of steps.
async fn run_movement_demo(config: &AppConfig) -> Registry {
    let mut registry = Registry::new();

    let player = registry.create_entity();
    registry.insert(player, Position::new(0.0, 0.0));
    registry.insert(player, Velocity::new(1.0, 0.5));

    let enemy = registry.create_entity();
    registry.insert(enemy, Position::new(10.0, 5.0));
    registry.insert(enemy, Velocity::new(-0.5, 0.0));

    let mut tick_loop = TickLoop::new(config.tick.clone(), registry);
    tick_loop.run().await;
    let ticks = tick_loop.tick_id();

    let registry = tick_loop.into_registry();
    info!(ticks, entities = registry.len(), "movement demo complete");
    registry
}

/// Bind the demo socket and exchange the greeting. A bind failure ends the
/// demo early.
async fn run_socket_demo(config: &AppConfig) -> Option<Datagram> {
    let endpoint = match UdpEndpoint::bind(config.port).await {
        Ok(endpoint) => endpoint,
        Err(e) => {
            error!(error = %e, "failed to create socket");
            return None;
        }
    };

    let received = exchange_greeting(&endpoint, config).await;
    endpoint.close();
    received
}

/// Send the greeting to the configured peer, then wait for one datagram.
async fn exchange_greeting(endpoint: &UdpEndpoint, config: &AppConfig) -> Option<Datagram> {
    match endpoint
        .send_to(&config.greeting, &config.peer_ip, config.peer_port)
        .await
    {
        Ok(bytes) => info!(
            peer_ip = %config.peer_ip,
            peer_port = config.peer_port,
            bytes,
            "greeting sent"
        ),
        Err(e) => error!(error = %e, "failed to send"),
    }

    let received = match config.receive_timeout {
        Some(timeout) => endpoint.receive_from_timeout(timeout).await,
        None => endpoint.receive_from().await.map(Some),
    };

    match received {
        Ok(Some(datagram)) => {
            info!(
                message = %datagram.message,
                from = %datagram.from,
                "received datagram"
            );
            Some(datagram)
        }
        Ok(None) => {
            info!("no datagram received before timeout");
            None
        }
        Err(e) => {
            error!(error = %e, "failed to receive");
            None
        }
    }
}
