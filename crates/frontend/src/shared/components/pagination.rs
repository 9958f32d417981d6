use crate::shared::icons::icon;
use contracts::shared::pagination::PageDescriptor;
use leptos::prelude::*;

/// Entry of the page-number strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

/// Page numbers to show for `current` out of `total` pages.
///
/// Collections up to `max(window, 5)` pages are listed in full. Larger ones
/// keep the first and last page and show four pages next to either edge,
/// or the current page with its two neighbours in the middle:
///
/// - `current <= 3`: `1 2 3 4 … total`
/// - `current >= total - 2`: `1 … total-3 total-2 total-1 total`
/// - otherwise: `1 … current-1 current current+1 … total`
pub fn visible_pages(current: u32, total: u32, window: u32) -> Vec<PageItem> {
    if total <= window.max(5) {
        return (1..=total).map(PageItem::Page).collect();
    }
    let current = current.clamp(1, total);

    if current <= 3 {
        let mut items: Vec<PageItem> = (1..=4).map(PageItem::Page).collect();
        items.extend([PageItem::Ellipsis, PageItem::Page(total)]);
        items
    } else if current >= total - 2 {
        let mut items = vec![PageItem::Page(1), PageItem::Ellipsis];
        items.extend((total - 3..=total).map(PageItem::Page));
        items
    } else {
        vec![
            PageItem::Page(1),
            PageItem::Ellipsis,
            PageItem::Page(current - 1),
            PageItem::Page(current),
            PageItem::Page(current + 1),
            PageItem::Ellipsis,
            PageItem::Page(total),
        ]
    }
}

/// Controls are only shown for a non-empty collection
pub fn pagination_visible(page: &PageDescriptor) -> bool {
    page.total_items > 0
}

/// Page strip with previous/next buttons and a page-size selector.
///
/// Renders nothing for an empty collection.
#[component]
pub fn Pagination(
    #[prop(into)] page: Signal<PageDescriptor>,
    /// 1-based page requested by the user
    on_page_change: Callback<u32>,
    on_page_size_change: Callback<u32>,
    #[prop(optional)] page_size_options: Option<Vec<u32>>,
    #[prop(default = 5)] window: u32,
) -> impl IntoView {
    let page_size_opts = page_size_options.unwrap_or_else(|| vec![10, 25, 50, 100]);

    view! {
        <Show when=move || pagination_visible(&page.get())>
            <div class="pagination-controls">
                <span class="pagination-info">
                    {move || {
                        let p = page.get();
                        p.visible_range()
                            .map(|(from, to)| format!("{}–{} of {}", from, to, p.total_items))
                            .unwrap_or_default()
                    }}
                </span>
                <button
                    class="pagination-btn"
                    on:click=move |_| {
                        let p = page.get();
                        if p.has_previous() {
                            on_page_change.run(p.current_page - 1);
                        }
                    }
                    disabled=move || !page.get().has_previous()
                    title="Previous page"
                >
                    {icon("chevron-left")}
                </button>
                {move || {
                    let p = page.get();
                    visible_pages(p.current_page, p.total_pages(), window)
                        .into_iter()
                        .map(|item| match item {
                            PageItem::Page(n) => {
                                let active = n == p.current_page;
                                view! {
                                    <button
                                        class="pagination-btn"
                                        class:pagination-btn--active=active
                                        aria-current=if active { Some("page") } else { None }
                                        on:click=move |_| on_page_change.run(n)
                                    >
                                        {n.to_string()}
                                    </button>
                                }
                                .into_any()
                            }
                            PageItem::Ellipsis => {
                                view! { <span class="pagination-ellipsis">"…"</span> }.into_any()
                            }
                        })
                        .collect_view()
                }}
                <button
                    class="pagination-btn"
                    on:click=move |_| {
                        let p = page.get();
                        if p.has_next() {
                            on_page_change.run(p.current_page + 1);
                        }
                    }
                    disabled=move || !page.get().has_next()
                    title="Next page"
                >
                    {icon("chevron-right")}
                </button>
                <select
                    class="page-size-select"
                    on:change=move |ev| {
                        if let Ok(size) = event_target_value(&ev).parse::<u32>() {
                            on_page_size_change.run(size);
                        }
                    }
                    prop:value=move || page.get().page_size.to_string()
                >
                    {page_size_opts
                        .iter()
                        .map(|&size| {
                            view! {
                                <option
                                    value=size.to_string()
                                    selected=move || page.get().page_size == size
                                >
                                    {format!("{} / page", size)}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageItem::{Ellipsis, Page};

    #[test]
    fn test_reference_vectors() {
        assert_eq!(
            visible_pages(1, 10, 5),
            vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(10)]
        );
        assert_eq!(
            visible_pages(10, 10, 5),
            vec![Page(1), Ellipsis, Page(7), Page(8), Page(9), Page(10)]
        );
        assert_eq!(
            visible_pages(5, 10, 5),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
        assert_eq!(visible_pages(3, 3, 5), vec![Page(1), Page(2), Page(3)]);
    }

    #[test]
    fn test_empty_collection_hides_controls() {
        let empty = PageDescriptor::new(1, 10, 0);
        assert!(!pagination_visible(&empty));
        assert!(visible_pages(empty.current_page, empty.total_pages(), 5).is_empty());
        assert!(pagination_visible(&PageDescriptor::new(1, 10, 1)));
    }

    #[test]
    fn test_empty_and_out_of_range() {
        assert!(visible_pages(1, 0, 5).is_empty());
        assert_eq!(visible_pages(0, 10, 5), visible_pages(1, 10, 5));
        assert_eq!(visible_pages(99, 10, 5), visible_pages(10, 10, 5));
    }

    #[test]
    fn test_small_window_still_lists_five_pages() {
        assert_eq!(visible_pages(2, 5, 3).len(), 5);
    }

    #[test]
    fn test_window_properties() {
        for window in [3, 5, 7] {
            for total in 0..=40u32 {
                for current in 1..=total.max(1) {
                    let pages: Vec<u32> = visible_pages(current, total, window)
                        .into_iter()
                        .filter_map(|item| match item {
                            Page(n) => Some(n),
                            Ellipsis => None,
                        })
                        .collect();
                    assert!(pages.iter().all(|&n| n >= 1 && n <= total));
                    assert!(pages.windows(2).all(|w| w[0] < w[1]), "{current}/{total}");
                    if total > 0 {
                        assert!(pages.contains(&current));
                        assert_eq!(pages.first(), Some(&1));
                        assert_eq!(pages.last(), Some(&total));
                    }
                }
            }
        }
    }
}
