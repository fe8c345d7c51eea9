//! Paged list loading shared by selector and feature screens.

use std::future::Future;

use dioxus::prelude::*;
use shared_types::{AppError, PaginatedResponse};
use shared_ui::{use_toast, EmptyState, ErrorNotice, Pagination, SkeletonList, ToastOptions};

pub type ListResource<T> = Resource<Result<PaginatedResponse<T>, AppError>>;

/// Load one page of a list, reloading whenever the page or any signal read
/// synchronously inside `fetch` changes. A superseded request is dropped by
/// the resource, so a late response never overwrites a newer one.
pub fn use_paged<T, F, Fut>(fetch: F) -> (Signal<i64>, ListResource<T>)
where
    T: 'static,
    F: Fn(i64) -> Fut + 'static,
    Fut: Future<Output = Result<PaginatedResponse<T>, AppError>> + 'static,
{
    let page = use_signal(|| 1i64);
    let toast = use_toast();
    let resource = use_resource(move || {
        let request = fetch(page());
        async move {
            let result = request.await;
            if let Err(e) = &result {
                tracing::warn!(kind = %e.kind, error = %e.message, "list load failed");
                toast.error(e.friendly_message(), ToastOptions::new());
            }
            result
        }
    });
    (page, resource)
}

/// Loading skeleton, error notice with Retry, empty notice, or the rows
/// followed by pagination.
pub fn list_view<T: Clone + 'static>(
    mut resource: ListResource<T>,
    page: Signal<i64>,
    empty_message: &str,
    render: impl FnOnce(Vec<T>) -> Element,
) -> Element {
    let state = resource.read().clone();
    match state {
        None => rsx! { SkeletonList {} },
        Some(Err(e)) => rsx! {
            ErrorNotice {
                message: e.friendly_message(),
                on_retry: move |_| resource.restart(),
            }
        },
        Some(Ok(p)) if p.is_empty() => rsx! {
            EmptyState { message: empty_message.to_string() }
        },
        Some(Ok(p)) => {
            let meta = p.meta.clone();
            let rows = render(p.data);
            rsx! {
                {rows}
                Pagination { meta, page }
            }
        }
    }
}
