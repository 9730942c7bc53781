use std::env;

use kounta_client::{KountaClient, KountaConfig, KountaError, KountaResult};

#[tokio::main]
async fn main() -> KountaResult<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = KountaConfig::from_env()?;
    let site: i64 = env::var("KOUNTA_SITE_ID")
        .map_err(|_| KountaError::Config("KOUNTA_SITE_ID must be set".to_string()))?
        .parse()
        .map_err(|_| KountaError::Config("KOUNTA_SITE_ID must be a number".to_string()))?;
    let start = env::var("KOUNTA_ORDERS_START").ok();

    let client = KountaClient::connect(config)?;
    log::debug!("connecting with {:?}", client.config());

    let token = match env::var("KOUNTA_ACCESS_TOKEN") {
        Ok(token) => token,
        Err(_) => {
            let refresh = env::var("KOUNTA_REFRESH_TOKEN").map_err(|_| {
                KountaError::Config(
                    "set KOUNTA_ACCESS_TOKEN or KOUNTA_REFRESH_TOKEN".to_string(),
                )
            })?;
            client.refresh_token(&refresh).await?.access_token
        }
    };

    let company = client.company(&token).await?;
    log::info!("Reading completed orders for {} site {}", company.name, site);

    let orders = client
        .complete_order_pages(&token, company.id, site, start.as_deref())
        .collect_all()
        .await?;

    for order in &orders {
        log::info!(
            "order {} [{}] {}: total {:.2} tax {:.2} discount {:.2}",
            order.id,
            order.status,
            order.sale_date,
            order.total,
            order.total_tax(),
            order.total_discount()
        );
    }
    log::info!("{} orders", orders.len());

    Ok(())
}
