//! Subcommand handlers. Results are printed to stdout as pretty JSON.

use std::time::Duration;

use anyhow::Context;
use brewscout_core::ApiRequest;
use brewscout_core::api::ShopQuery;
use brewscout_shared::dto::{CreateCheckInRequest, LoginRequest, RegisterRequest};
use serde_json::json;

use crate::cli::Command;
use crate::state::AppState;

pub async fn run(state: &AppState, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { email, password } => {
            let session = state.auth.login(&LoginRequest { email, password }).await?;
            print(&json!({ "user": session.user, "authenticated": true }))
        }
        Command::Register {
            name,
            email,
            password,
        } => {
            let session = state
                .auth
                .register(&RegisterRequest {
                    name,
                    email,
                    password,
                })
                .await?;
            print(&json!({ "user": session.user, "authenticated": true }))
        }
        Command::Logout => {
            state.auth.logout().await?;
            print(&json!({ "authenticated": false }))
        }
        Command::Whoami { offline } => {
            let user = if offline {
                state
                    .auth
                    .cached_user()
                    .context("no profile stored - log in first")?
            } else {
                state.auth.current_user().await?
            };
            print(&user)
        }
        Command::Shops {
            search,
            equipments,
            page,
            page_size,
        } => {
            let query = ShopQuery {
                search,
                equipments,
                page,
                page_size,
            };
            let shops = state.shops.list(&query).await?;
            print(&json!({ "items": shops.items, "pagination": shops.pagination }))
        }
        Command::Shop { id } => print(&state.shops.get(id).await?),
        Command::Reviews {
            shop_id,
            page,
            page_size,
        } => {
            let reviews = state.reviews.list_for_shop(shop_id, page, page_size).await?;
            print(&json!({ "items": reviews.items, "pagination": reviews.pagination }))
        }
        Command::CheckIn { shop_id, note } => {
            let check_in = state
                .check_ins
                .check_in(&CreateCheckInRequest {
                    coffee_shop_id: shop_id,
                    note,
                })
                .await?;
            print(&check_in)
        }
        Command::Get { path, cache_secs } => {
            let mut request = ApiRequest::get(path);
            if let Some(secs) = cache_secs {
                request = request.cache_for(Duration::from_secs(secs));
            }
            print(&state.client.send(request).await?)
        }
    }
}

fn print<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
