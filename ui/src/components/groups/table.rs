//! Groups Table Component
//!
//! Sortable, filterable, paged table over the groups of one kind. The sort,
//! filter, and page the operator picks are written to the view state store
//! on every change and restored when the table mounts again.

use leptos::*;

use pgpanel_shared::{Group, GroupKind};

use crate::components::common::*;
use crate::controller::{RowAction, RowOperation};
use crate::state::{SortColumn, SortDirection, TableViewState, ViewStateStore, PAGE_SIZES};

/// One renderable page of the groups table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePage {
    pub rows: Vec<Group>,
    pub filtered_total: usize,
    pub page_index: usize,
    pub page_count: usize,
}

/// Apply filter, sort, and paging to the full group list
///
/// Filtering matches name and description, case-insensitively. Sorting by
/// member count falls back to the name so equal counts keep a stable order.
/// A page index past the end clamps to the last page.
pub fn project(groups: &[Group], view: &TableViewState) -> TablePage {
    let needle = view.filter_text.trim().to_lowercase();

    let mut filtered: Vec<Group> = groups
        .iter()
        .filter(|group| {
            needle.is_empty()
                || group.name.to_lowercase().contains(&needle)
                || group
                    .description
                    .as_ref()
                    .map(|d| d.to_lowercase().contains(&needle))
                    .unwrap_or(false)
        })
        .cloned()
        .collect();

    filtered.sort_by(|a, b| {
        let ordering = match view.sort_column {
            SortColumn::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortColumn::Members => a
                .member_count()
                .cmp(&b.member_count())
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
        };
        match view.sort_direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    let page_size = view.page_size.max(1);
    let filtered_total = filtered.len();
    let page_count = filtered_total.div_ceil(page_size).max(1);
    let page_index = view.page_index.min(page_count - 1);
    let rows = filtered
        .into_iter()
        .skip(page_index * page_size)
        .take(page_size)
        .collect();

    TablePage {
        rows,
        filtered_total,
        page_index,
        page_count,
    }
}

/// Groups table with persistent view state
#[component]
pub fn GroupsTable(
    kind: GroupKind,
    groups: ReadSignal<Vec<Group>>,
    state_store: ViewStateStore,
    open_popover: RwSignal<Option<String>>,
    #[prop(into)] on_row_action: Callback<RowAction>,
) -> impl IntoView {
    let view_state = create_rw_signal(state_store.load().unwrap_or_default());

    // Persist every change
    create_effect(move |_| {
        state_store.save(&view_state.get());
    });

    let page = create_memo(move |_| project(&groups.get(), &view_state.get()));

    let sort_by = move |column: SortColumn| {
        view_state.update(|state| {
            if state.sort_column == column {
                state.sort_direction = state.sort_direction.toggled();
            } else {
                state.sort_column = column;
                state.sort_direction = SortDirection::Asc;
            }
        });
    };

    let sort_indicator = move |column: SortColumn| {
        let state = view_state.get();
        (state.sort_column == column).then(|| match state.sort_direction {
            SortDirection::Asc => view! { <ChevronUpIcon class="w-3 h-3" /> }.into_view(),
            SortDirection::Desc => view! { <ChevronDownIcon class="w-3 h-3" /> }.into_view(),
        })
    };

    view! {
        <div class="bg-theme-surface rounded-xl border border-theme-border overflow-hidden">
            // Filter and page size controls
            <div class="flex items-center justify-between px-4 py-3 border-b border-theme-border">
                <input
                    type="text"
                    class="input max-w-xs"
                    placeholder="Filter groups..."
                    prop:value=move || view_state.get().filter_text
                    on:input=move |e| {
                        view_state.update(|state| {
                            state.filter_text = event_target_value(&e);
                            state.page_index = 0;
                        });
                    }
                />
                <select
                    class="input w-24"
                    prop:value=move || view_state.get().page_size.to_string()
                    on:change=move |e| {
                        if let Ok(size) = event_target_value(&e).parse::<usize>() {
                            view_state.update(|state| {
                                state.page_size = size;
                                state.page_index = 0;
                            });
                        }
                    }
                >
                    {PAGE_SIZES
                        .iter()
                        .map(|size| view! { <option value=size.to_string()>{size.to_string()}</option> })
                        .collect::<Vec<_>>()}
                </select>
            </div>

            {move || {
                let current = page.get();
                if current.rows.is_empty() {
                    view! {
                        <div class="p-8 text-center">
                            <p class="text-theme-secondary">
                                {if view_state.get().filter_text.trim().is_empty() {
                                    format!("No {} groups yet", kind)
                                } else {
                                    "No groups match the filter".to_string()
                                }}
                            </p>
                            <p class="text-sm text-theme-muted mt-1">
                                {move || {
                                    if view_state.get().filter_text.trim().is_empty() {
                                        format!("Create one to organize your {}s", kind.member_noun())
                                    } else {
                                        "Try a different filter".to_string()
                                    }
                                }}
                            </p>
                        </div>
                    }
                    .into_view()
                } else {
                    view! {
                        <table class="w-full">
                            <thead>
                                <tr class="border-b border-theme-border bg-theme-bg">
                                    <th class="px-4 py-3 text-left text-xs font-medium text-theme-muted uppercase tracking-wider">
                                        <button
                                            class="flex items-center gap-1 uppercase tracking-wider"
                                            on:click=move |_| sort_by(SortColumn::Name)
                                        >
                                            "Name"
                                            {move || sort_indicator(SortColumn::Name)}
                                        </button>
                                    </th>
                                    <th class="px-4 py-3 text-left text-xs font-medium text-theme-muted uppercase tracking-wider">"Description"</th>
                                    <th class="px-4 py-3 text-left text-xs font-medium text-theme-muted uppercase tracking-wider">
                                        <button
                                            class="flex items-center gap-1 uppercase tracking-wider"
                                            on:click=move |_| sort_by(SortColumn::Members)
                                        >
                                            "Members"
                                            {move || sort_indicator(SortColumn::Members)}
                                        </button>
                                    </th>
                                    <th class="px-4 py-3 text-right text-xs font-medium text-theme-muted uppercase tracking-wider">"Actions"</th>
                                </tr>
                            </thead>
                            <tbody class="divide-y divide-theme-border">
                                {current
                                    .rows
                                    .into_iter()
                                    .map(|group| {
                                        let edit_name = group.name.clone();
                                        let delete_name = group.name.clone();
                                        let popover_name = group.name.clone();
                                        let shown_name = group.name.clone();
                                        let members = group.members.clone();
                                        let member_label = format!(
                                            "{} {}{}",
                                            group.member_count(),
                                            kind.member_noun(),
                                            if group.member_count() == 1 { "" } else { "s" }
                                        );
                                        view! {
                                            <tr class="hover:bg-theme-surface-hover transition-colors">
                                                <td class="px-4 py-3 text-theme font-medium">{group.name.clone()}</td>
                                                <td class="px-4 py-3 text-theme-secondary text-sm">
                                                    {group.description.clone().unwrap_or_default()}
                                                </td>
                                                <td class="px-4 py-3 relative">
                                                    <button
                                                        class="btn-ghost px-2 py-1 text-sm"
                                                        on:click=move |_| {
                                                            open_popover.update(|open| {
                                                                if open.as_deref() == Some(popover_name.as_str()) {
                                                                    *open = None;
                                                                } else {
                                                                    *open = Some(popover_name.clone());
                                                                }
                                                            });
                                                        }
                                                    >
                                                        {member_label}
                                                    </button>
                                                    {move || {
                                                        (open_popover.get().as_deref() == Some(shown_name.as_str())).then(|| {
                                                            view! {
                                                                <div class="popover absolute left-4 top-full z-10 mt-1 w-56 rounded-lg border border-theme-border bg-theme-surface p-3 shadow-lg">
                                                                    {if members.is_empty() {
                                                                        view! {
                                                                            <p class="text-sm text-theme-muted">"No members yet"</p>
                                                                        }
                                                                        .into_view()
                                                                    } else {
                                                                        view! {
                                                                            <ul class="space-y-1 text-sm text-theme-secondary">
                                                                                {members
                                                                                    .iter()
                                                                                    .map(|member| view! { <li class="font-mono">{member.clone()}</li> })
                                                                                    .collect::<Vec<_>>()}
                                                                            </ul>
                                                                        }
                                                                        .into_view()
                                                                    }}
                                                                </div>
                                                            }
                                                        })
                                                    }}
                                                </td>
                                                <td class="px-4 py-3 text-right">
                                                    <div class="flex items-center justify-end gap-2">
                                                        <button
                                                            class="btn-ghost px-2 py-1 text-sm"
                                                            data-action="edit"
                                                            data-group-name=group.name.clone()
                                                            on:click=move |_| {
                                                                on_row_action.call(RowAction {
                                                                    operation: RowOperation::Edit,
                                                                    group_name: edit_name.clone(),
                                                                });
                                                            }
                                                        >
                                                            <PencilIcon class="w-4 h-4" />
                                                            "Edit"
                                                        </button>
                                                        <button
                                                            class="btn-ghost px-2 py-1 text-sm text-error hover:bg-error/10"
                                                            data-action="delete"
                                                            data-group-name=group.name.clone()
                                                            on:click=move |_| {
                                                                on_row_action.call(RowAction {
                                                                    operation: RowOperation::Delete,
                                                                    group_name: delete_name.clone(),
                                                                });
                                                            }
                                                        >
                                                            <TrashIcon class="w-4 h-4" />
                                                            "Delete"
                                                        </button>
                                                    </div>
                                                </td>
                                            </tr>
                                        }
                                    })
                                    .collect::<Vec<_>>()}
                            </tbody>
                        </table>
                    }
                    .into_view()
                }
            }}

            // Pagination footer
            <div class="flex items-center justify-between px-4 py-3 border-t border-theme-border text-sm">
                <span class="text-theme-secondary">
                    {move || format!("{} groups", page.get().filtered_total)}
                </span>
                <div class="flex items-center gap-2">
                    <button
                        class="btn-ghost px-2 py-1"
                        disabled=move || page.get().page_index == 0
                        on:click=move |_| {
                            view_state.update(|state| {
                                state.page_index = state.page_index.saturating_sub(1);
                            });
                        }
                    >
                        <ChevronLeftIcon class="w-4 h-4" />
                    </button>
                    <span class="text-theme-secondary">
                        {move || {
                            let current = page.get();
                            format!("Page {} of {}", current.page_index + 1, current.page_count)
                        }}
                    </span>
                    <button
                        class="btn-ghost px-2 py-1"
                        disabled=move || {
                            let current = page.get();
                            current.page_index + 1 >= current.page_count
                        }
                        on:click=move |_| {
                            let last = page.get_untracked().page_count - 1;
                            view_state.update(|state| {
                                if state.page_index < last {
                                    state.page_index += 1;
                                }
                            });
                        }
                    >
                        <ChevronRightIcon class="w-4 h-4" />
                    </button>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(name: &str, description: Option<&str>, members: &[&str]) -> Group {
        Group {
            name: name.to_string(),
            description: description.map(str::to_string),
            members: members.iter().map(|m| m.to_string()).collect(),
        }
    }

    fn sample_groups() -> Vec<Group> {
        vec![
            group("prod", Some("production fleet"), &["db1", "db2", "db3"]),
            group("Staging", None, &["db4"]),
            group("reporting", Some("read replicas"), &["db5", "db6"]),
        ]
    }

    fn names(page: &TablePage) -> Vec<&str> {
        page.rows.iter().map(|g| g.name.as_str()).collect()
    }

    #[test]
    fn test_name_sort_ignores_case() {
        let page = project(&sample_groups(), &TableViewState::default());
        assert_eq!(names(&page), ["prod", "reporting", "Staging"]);
    }

    #[test]
    fn test_descending_sort_reverses_order() {
        let view = TableViewState {
            sort_direction: SortDirection::Desc,
            ..Default::default()
        };
        let page = project(&sample_groups(), &view);
        assert_eq!(names(&page), ["Staging", "reporting", "prod"]);
    }

    #[test]
    fn test_member_sort_breaks_ties_by_name() {
        let groups = vec![
            group("beta", None, &["a", "b"]),
            group("alpha", None, &["c", "d"]),
            group("solo", None, &["e"]),
        ];
        let view = TableViewState {
            sort_column: SortColumn::Members,
            ..Default::default()
        };
        let page = project(&groups, &view);
        assert_eq!(names(&page), ["solo", "alpha", "beta"]);
    }

    #[test]
    fn test_filter_matches_name_and_description() {
        let view = TableViewState {
            filter_text: "read".to_string(),
            ..Default::default()
        };
        let page = project(&sample_groups(), &view);
        assert_eq!(page.filtered_total, 1);
        assert_eq!(names(&page), ["reporting"]);

        let view = TableViewState {
            filter_text: "STAG".to_string(),
            ..Default::default()
        };
        let page = project(&sample_groups(), &view);
        assert_eq!(names(&page), ["Staging"]);
    }

    #[test]
    fn test_second_page_offset() {
        let many: Vec<Group> = (0..25)
            .map(|i| group(&format!("group-{i:02}"), None, &[]))
            .collect();
        let view = TableViewState {
            page_index: 1,
            ..Default::default()
        };
        let page = project(&many, &view);
        assert_eq!(page.page_count, 3);
        assert_eq!(page.rows.len(), 10);
        assert_eq!(page.rows[0].name, "group-10");
    }

    #[test]
    fn test_page_index_clamps_to_last_page() {
        let many: Vec<Group> = (0..25)
            .map(|i| group(&format!("group-{i:02}"), None, &[]))
            .collect();
        let view = TableViewState {
            page_index: 9,
            ..Default::default()
        };
        let page = project(&many, &view);
        assert_eq!(page.page_index, 2);
        assert_eq!(page.rows.len(), 5);
        assert_eq!(page.rows[0].name, "group-20");
    }

    #[test]
    fn test_empty_list_has_one_page() {
        let page = project(&[], &TableViewState::default());
        assert_eq!(page.page_count, 1);
        assert_eq!(page.page_index, 0);
        assert!(page.rows.is_empty());
    }
}
