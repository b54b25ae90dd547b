use dotenvy::dotenv;
use std::env;
use std::sync::Arc;
use std::time::Duration;

use mergington::client::{
    ActivitiesRefresher, ClickEvent, DeleteClickHandler, Element, ParticipantsApi,
};

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let Some(email) = env::args().nth(1) else {
        eprintln!("usage: unregister_participant <email>");
        std::process::exit(2);
    };

    let api = ParticipantsApi::from_env();
    let refresher = ActivitiesRefresher::new(api.clone());
    let mut listing = refresher.subscribe();
    let handler = DeleteClickHandler::new(api, Arc::new(refresher));

    let click = ClickEvent::on(
        Element::new("button")
            .with_class("delete-btn")
            .with_attribute("data-email", email),
    );
    let Some(task) = handler.handle_click(&click) else {
        std::process::exit(1);
    };

    let outcome = match task.await {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("unregister task failed: {}", e);
            std::process::exit(1);
        }
    };
    if !outcome.is_unregistered() {
        std::process::exit(1);
    }

    // Wait for the repaint triggered by the successful unregister.
    match tokio::time::timeout(Duration::from_secs(10), listing.changed()).await {
        Ok(Ok(())) => {}
        _ => {
            eprintln!("activities list did not refresh");
            std::process::exit(1);
        }
    }
    let snapshot = listing.borrow().clone();
    if let Some(activities) = snapshot {
        for (name, details) in activities {
            let participants = details
                .get("participants")
                .and_then(|p| p.as_array())
                .map(|p| p.len())
                .unwrap_or(0);
            println!("{}: {} participants", name, participants);
        }
    }
}
