/*
[INPUT]:  OrderListController, filter selection, page limit
[OUTPUT]: One tab-separated line per order written to stdout
[POS]:    Headless listing command
[UPDATE]: When the listing format or paging rules change
*/

use std::io::Write;

use anyhow::{Context, Result, bail};
use fazaa_orders::{
    FetchHandle, FilterSelection, OrderListController, display_title, schedule_label,
    status_palette,
};
use fazaa_orders_adapter::Order;
use tracing::debug;

/// Page through `filter` until `pages` pages are loaded or the list ends.
///
/// Returns the number of orders written.
pub async fn run_list<W: Write>(
    controller: &OrderListController,
    filter: FilterSelection,
    pages: u32,
    out: &mut W,
) -> Result<usize> {
    let page_size = controller.page_size();
    let handle = controller
        .refresh(filter, page_size)
        .context("start order listing")?;
    let mut printed = finish_page(controller, handle, 0, out).await?;

    let mut page = 1;
    while page < pages {
        let Some(handle) = controller
            .load_more(filter, page_size)
            .context("load next page")?
        else {
            debug!(page, "no more pages");
            break;
        };
        printed = finish_page(controller, Some(handle), printed, out).await?;
        page += 1;
    }

    out.flush()?;
    Ok(printed)
}

async fn finish_page<W: Write>(
    controller: &OrderListController,
    handle: Option<FetchHandle>,
    printed: usize,
    out: &mut W,
) -> Result<usize> {
    if let Some(handle) = handle {
        handle.await.context("order fetch task")?;
    }

    let state = controller.snapshot();
    if let Some(kind) = state.last_error() {
        bail!("{} (page {})", kind.message(), state.failed_page().unwrap_or(1));
    }

    for order in &state.items()[printed..] {
        writeln!(out, "{}", format_order_line(order))?;
    }
    Ok(state.items().len())
}

pub(crate) fn format_order_line(order: &Order) -> String {
    let order_no = order
        .order_no
        .as_deref()
        .map(|no| format!("#{no}"))
        .unwrap_or_else(|| "-".to_string());
    [
        order_no,
        status_palette(order.status).title.to_string(),
        display_title(order).to_string(),
        schedule_label(order).unwrap_or_else(|| "-".to_string()),
        order.address_line().unwrap_or("-").to_string(),
    ]
    .join("\t")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use fazaa_orders::OrderQuery;
    use fazaa_orders_adapter::{Address, OrderStatus, OrdersError, OrdersPage};

    struct PagedQuery {
        total_pages: u32,
        fail_on: Option<u32>,
    }

    #[async_trait]
    impl OrderQuery for PagedQuery {
        async fn fetch_orders(
            &self,
            _status: Option<&str>,
            page: u32,
            limit: u32,
        ) -> fazaa_orders_adapter::Result<OrdersPage> {
            if self.fail_on == Some(page) {
                return Err(OrdersError::Api {
                    code: 500,
                    message: "down".to_string(),
                });
            }
            let orders = (0..limit)
                .map(|offset| Order {
                    id: Some(i64::from(page * 100 + offset)),
                    title: None,
                    order_no: Some(format!("{page}-{offset}")),
                    status: OrderStatus::Accepted,
                    dt_date: None,
                    dt_time: None,
                    address: None,
                })
                .collect();
            Ok(OrdersPage {
                orders,
                total_pages: self.total_pages,
            })
        }
    }

    fn controller(total_pages: u32, fail_on: Option<u32>) -> OrderListController {
        OrderListController::new(Arc::new(PagedQuery { total_pages, fail_on }), 2)
    }

    #[tokio::test]
    async fn test_stops_at_requested_pages() {
        let mut out = Vec::new();
        let printed = run_list(&controller(5, None), FilterSelection::All, 2, &mut out)
            .await
            .unwrap();

        assert_eq!(printed, 4);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert!(text.lines().last().unwrap().starts_with("#2-1\tAccepted"));
    }

    #[tokio::test]
    async fn test_stops_at_last_page() {
        let mut out = Vec::new();
        let printed = run_list(&controller(2, None), FilterSelection::All, 10, &mut out)
            .await
            .unwrap();
        assert_eq!(printed, 4);
    }

    #[tokio::test]
    async fn test_failure_reported_after_printing_earlier_pages() {
        let mut out = Vec::new();
        let err = run_list(&controller(3, Some(2)), FilterSelection::All, 3, &mut out)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("page 2"));
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 2);
    }

    #[test]
    fn test_format_order_line() {
        let order = Order {
            id: None,
            title: None,
            order_no: Some("A-7".to_string()),
            status: OrderStatus::Canceled,
            dt_date: Some("2025-09-25".to_string()),
            dt_time: Some("09:00".to_string()),
            address: Some(Address {
                address: Some("Olaya St".to_string()),
                details: None,
            }),
        };
        assert_eq!(
            format_order_line(&order),
            "#A-7\tCanceled\tOrder details\t2025-09-25 09:00\tOlaya St"
        );
    }
}
