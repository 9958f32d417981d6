//! Generic table bound to column descriptors, with isolated row actions.
//!
//! Click routing lives in [`dispatch_click`] and button gating in
//! [`action_buttons`], so both rules are checked without a DOM.

use crate::shared::icons::icon;
use leptos::prelude::*;
use std::sync::Arc;
use thaw::*;

pub type CellRenderer<T> = Arc<dyn Fn(&T) -> AnyView + Send + Sync>;

/// How one column renders; owned by the page, stateless
pub struct Column<T> {
    pub key: &'static str,
    pub header: &'static str,
    pub render: CellRenderer<T>,
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            header: self.header,
            render: Arc::clone(&self.render),
        }
    }
}

impl<T: 'static> Column<T> {
    pub fn new<F>(key: &'static str, header: &'static str, render: F) -> Self
    where
        F: Fn(&T) -> AnyView + Send + Sync + 'static,
    {
        Self {
            key,
            header,
            render: Arc::new(render),
        }
    }

    /// Plain text cell
    pub fn text<F>(key: &'static str, header: &'static str, value: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        Self::new(key, header, move |row| {
            let text = value(row);
            view! { <span>{text}</span> }.into_any()
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Edit,
    Delete,
}

/// A rendered action button and whether it reacts to clicks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionButton {
    pub action: RowAction,
    pub enabled: bool,
}

/// Which callbacks the page supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowHandlers {
    pub row_click: bool,
    pub edit: bool,
    pub delete: bool,
}

/// Capability flags of the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionGates {
    pub can_edit: bool,
    pub can_delete: bool,
}

impl Default for ActionGates {
    fn default() -> Self {
        Self {
            can_edit: true,
            can_delete: true,
        }
    }
}

/// Buttons exist iff their callback exists; they are enabled iff allowed.
pub fn action_buttons(handlers: RowHandlers, gates: ActionGates) -> Vec<ActionButton> {
    let mut buttons = Vec::with_capacity(2);
    if handlers.edit {
        buttons.push(ActionButton {
            action: RowAction::Edit,
            enabled: gates.can_edit,
        });
    }
    if handlers.delete {
        buttons.push(ActionButton {
            action: RowAction::Delete,
            enabled: gates.can_delete,
        });
    }
    buttons
}

/// Where inside a row the click landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOrigin {
    Row,
    Action(RowAction),
}

/// Callback a click resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowDispatch {
    RowClick,
    Action(RowAction),
    Ignore,
}

/// Route a click to at most one callback.
///
/// Clicks in the action region never reach the row handler.
pub fn dispatch_click(origin: ClickOrigin, handlers: RowHandlers, gates: ActionGates) -> RowDispatch {
    match origin {
        ClickOrigin::Row if handlers.row_click && gates.can_edit => RowDispatch::RowClick,
        ClickOrigin::Row => RowDispatch::Ignore,
        ClickOrigin::Action(action) => {
            let enabled = action_buttons(handlers, gates)
                .iter()
                .any(|b| b.action == action && b.enabled);
            if enabled {
                RowDispatch::Action(action)
            } else {
                RowDispatch::Ignore
            }
        }
    }
}

fn has_action_column(handlers: RowHandlers) -> bool {
    handlers.edit || handlers.delete
}

/// Cells per row, which is also the colspan of the empty-state row
pub fn table_width(columns: usize, handlers: RowHandlers) -> usize {
    columns + usize::from(has_action_column(handlers))
}

#[component]
pub fn DataTable<T>(
    columns: Vec<Column<T>>,
    #[prop(into)] rows: Signal<Vec<T>>,
    #[prop(optional_no_strip)] on_row_click: Option<Callback<T>>,
    #[prop(optional_no_strip)] on_edit: Option<Callback<T>>,
    #[prop(optional_no_strip)] on_delete: Option<Callback<T>>,
    /// Defaults to true
    #[prop(optional, into)]
    can_edit: MaybeProp<bool>,
    /// Defaults to true
    #[prop(optional, into)]
    can_delete: MaybeProp<bool>,
    #[prop(optional, into)] empty_message: Option<String>,
) -> impl IntoView
where
    T: Clone + Send + Sync + 'static,
{
    let handlers = RowHandlers {
        row_click: on_row_click.is_some(),
        edit: on_edit.is_some(),
        delete: on_delete.is_some(),
    };
    let has_actions = has_action_column(handlers);
    let gates = move || ActionGates {
        can_edit: can_edit.get().unwrap_or(true),
        can_delete: can_delete.get().unwrap_or(true),
    };
    let empty_message = empty_message.unwrap_or_else(|| "No records found".to_string());
    let column_count = table_width(columns.len(), handlers);
    let columns = Arc::new(columns);

    let run = move |dispatch: RowDispatch, row: T| match dispatch {
        RowDispatch::RowClick => {
            if let Some(cb) = on_row_click {
                cb.run(row);
            }
        }
        RowDispatch::Action(RowAction::Edit) => {
            if let Some(cb) = on_edit {
                cb.run(row);
            }
        }
        RowDispatch::Action(RowAction::Delete) => {
            if let Some(cb) = on_delete {
                cb.run(row);
            }
        }
        RowDispatch::Ignore => {}
    };

    let header_cells = columns
        .iter()
        .map(|col| {
            let (key, header) = (col.key, col.header);
            view! { <TableHeaderCell attr:data-column=key>{header}</TableHeaderCell> }
        })
        .collect_view();

    let body_columns = Arc::clone(&columns);
    let body = move || {
        let items = rows.get();
        if items.is_empty() {
            let message = empty_message.clone();
            return view! {
                <TableRow>
                    <TableCell attr:colspan=column_count.to_string()>
                        <div class="table__empty">{message}</div>
                    </TableCell>
                </TableRow>
            }
            .into_any();
        }
        let gates_now = gates();
        let clickable = dispatch_click(ClickOrigin::Row, handlers, gates_now) == RowDispatch::RowClick;
        items
            .into_iter()
            .map(|row| {
                let cells = body_columns
                    .iter()
                    .map(|col| {
                        let cell = (col.render)(&row);
                        let key = col.key;
                        view! { <TableCell attr:data-column=key>{cell}</TableCell> }
                    })
                    .collect_view();
                let row_for_click = row.clone();
                let buttons = action_buttons(handlers, gates_now)
                    .into_iter()
                    .map(|button| {
                        let row = row.clone();
                        let (label, icon_name) = match button.action {
                            RowAction::Edit => ("Edit", "edit"),
                            RowAction::Delete => ("Delete", "delete"),
                        };
                        view! {
                            <Button
                                size=ButtonSize::Small
                                appearance=ButtonAppearance::Subtle
                                disabled=!button.enabled
                                attr:title=label
                                class=if button.enabled { "table__action" } else { "table__action table__action--muted" }
                                on_click=move |_| {
                                    let dispatch = dispatch_click(
                                        ClickOrigin::Action(button.action),
                                        handlers,
                                        gates(),
                                    );
                                    run(dispatch, row.clone());
                                }
                            >
                                {icon(icon_name)}
                            </Button>
                        }
                    })
                    .collect_view();
                view! {
                    <TableRow
                        class=if clickable { "table__row table__row--clickable" } else { "table__row" }
                        on:click=move |_| {
                            let dispatch = dispatch_click(ClickOrigin::Row, handlers, gates());
                            run(dispatch, row_for_click.clone());
                        }
                    >
                        {cells}
                        {has_actions.then(|| view! {
                            <td class="table__cell table__cell--actions" on:click=|e| e.stop_propagation()>
                                {buttons}
                            </td>
                        })}
                    </TableRow>
                }
                .into_any()
            })
            .collect_view()
            .into_any()
    };

    view! {
        <div class="table-wrapper">
            <Table>
                <TableHeader>
                    <TableRow>
                        {header_cells}
                        {has_actions.then(|| view! { <TableHeaderCell>"Actions"</TableHeaderCell> })}
                    </TableRow>
                </TableHeader>
                <TableBody>{body}</TableBody>
            </Table>
        </div>
    }
}
