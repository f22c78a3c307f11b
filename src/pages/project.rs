//! Project workspace: paper upload, clustering runs, and the concept map.

use std::collections::BTreeMap;

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_params_map;
use wasm_bindgen_futures::spawn_local;
use web_sys::{FormData, HtmlInputElement};

use crate::api::Session;
use crate::api::client::{clustering, papers, projects};
use crate::api::types::{Paper, Project};
use crate::components::concept_graph::{
	ClusterNames, ClusterPalette, ConceptGraph, GraphNode, GraphPayload, theme::cluster_label,
	truncate,
};

/// Max characters of a cluster-summary-derived name.
const SUMMARY_NAME_MAX: usize = 40;
/// Max characters of a cluster name shown in the sidebar.
const CLUSTER_NAME_MAX: usize = 30;
/// Max characters of an author list shown in the sidebar.
const AUTHORS_MAX: usize = 40;
/// Papers needed before a clustering run makes sense.
const MIN_PAPERS_FOR_CLUSTERING: usize = 2;

/// One project's workspace: sidebar of papers grouped by cluster, the concept
/// map in the middle, and a detail panel for the selected paper.
#[component]
pub fn ProjectView() -> impl IntoView {
	let session = expect_context::<Session>();
	if !session.is_authenticated() {
		return view! { <Redirect path="/login" /> }.into_any();
	}

	let params = use_params_map();
	let project_id = params.with_untracked(|p| p.get("id").unwrap_or_default());
	let palette = ClusterPalette::default();

	let (project, set_project) = signal(None::<Project>);
	let (paper_list, set_paper_list) = signal(Vec::<Paper>::new());
	let (graph, set_graph) = signal(None::<GraphPayload>);
	let (cluster_names, set_cluster_names) = signal(ClusterNames::new());
	let (loading, set_loading) = signal(true);
	let (error, set_error) = signal(None::<String>);
	let (cluster_busy, set_cluster_busy) = signal(false);
	let (uploading, set_uploading) = signal(false);
	let (show_upload, set_show_upload) = signal(false);
	let (upload_title, set_upload_title) = signal(String::new());
	let (selected, set_selected) = signal(None::<GraphNode>);
	let (editing_cluster, set_editing_cluster) = signal(None::<u32>);
	let (rename_value, set_rename_value) = signal(String::new());

	let file_input = NodeRef::<leptos::html::Input>::new();

	let load = {
		let project_id = project_id.clone();
		move || {
			let project_id = project_id.clone();
			set_loading.set(true);
			spawn_local(async move {
				match projects::get(&project_id).await {
					Ok(found) => set_project.set(Some(found)),
					Err(err) => set_error.set(Some(err.to_string())),
				}
				match papers::list(&project_id).await {
					Ok(list) => set_paper_list.set(list),
					Err(err) => set_error.set(Some(err.to_string())),
				}
				// No graph exists until the first clustering run; treat a
				// failure here as "nothing to draw yet".
				if let Ok(payload) = clustering::graph(&project_id).await {
					set_graph.set(Some(payload));
				}
				set_loading.set(false);
			});
		}
	};
	load();

	let run_clustering = {
		let project_id = project_id.clone();
		move |_| {
			let project_id = project_id.clone();
			set_error.set(None);
			set_cluster_busy.set(true);
			spawn_local(async move {
				match clustering::cluster(&project_id).await {
					Ok(outcome) => {
						let names = outcome
							.cluster_summaries
							.into_iter()
							.map(|(id, summary)| (id, truncate(&summary, SUMMARY_NAME_MAX)))
							.collect::<ClusterNames>();
						set_cluster_names.set(names);
						if let Ok(payload) = clustering::graph(&project_id).await {
							set_graph.set(Some(payload));
						}
						if let Ok(list) = papers::list(&project_id).await {
							set_paper_list.set(list);
						}
					}
					Err(err) => set_error.set(Some(err.to_string())),
				}
				set_cluster_busy.set(false);
			});
		}
	};

	let upload = {
		let project_id = project_id.clone();
		move |ev: SubmitEvent| {
			ev.prevent_default();
			let Some(input) = file_input.get_untracked() else {
				return;
			};
			let input: HtmlInputElement = input.into();
			let Some(file) = input.files().and_then(|files| files.get(0)) else {
				set_error.set(Some("Choose a PDF file to upload".to_string()));
				return;
			};
			let Ok(form) = FormData::new() else {
				return;
			};
			let _ = form.append_with_str("project_id", &project_id);
			let _ = form.append_with_str("input_type", "pdf");
			let title = upload_title.get_untracked();
			if !title.trim().is_empty() {
				let _ = form.append_with_str("title", title.trim());
			}
			let _ = form.append_with_blob_and_filename("file", &file, &file.name());

			let project_id = project_id.clone();
			set_error.set(None);
			set_uploading.set(true);
			spawn_local(async move {
				match papers::upload(&form).await {
					Ok(_) => {
						set_show_upload.set(false);
						set_upload_title.set(String::new());
						if let Ok(list) = papers::list(&project_id).await {
							set_paper_list.set(list);
						}
					}
					Err(err) => set_error.set(Some(err.to_string())),
				}
				set_uploading.set(false);
			});
		}
	};

	let delete_paper = {
		let project_id = project_id.clone();
		move |paper_id: String| {
			let confirmed = web_sys::window()
				.map(|w| {
					w.confirm_with_message("Delete this paper from the project?")
						.unwrap_or(false)
				})
				.unwrap_or(false);
			if !confirmed {
				return;
			}
			let project_id = project_id.clone();
			spawn_local(async move {
				match papers::delete(&paper_id).await {
					Ok(()) => {
						// The selected node may be the paper just deleted.
						if selected.with_untracked(|s| {
							s.as_ref().is_some_and(|node| node.id.to_string() == paper_id)
						}) {
							set_selected.set(None);
						}
						if let Ok(list) = papers::list(&project_id).await {
							set_paper_list.set(list);
						}
						if let Ok(payload) = clustering::graph(&project_id).await {
							set_graph.set(Some(payload));
						}
					}
					Err(err) => set_error.set(Some(err.to_string())),
				}
			});
		}
	};

	let begin_rename = move |cluster_id: u32| {
		let current = cluster_names.with_untracked(|names| cluster_label(names, cluster_id));
		set_rename_value.set(current);
		set_editing_cluster.set(Some(cluster_id));
	};

	let commit_rename = move |cluster_id: u32| {
		let value = rename_value.get_untracked();
		let trimmed = value.trim();
		if !trimmed.is_empty() {
			set_cluster_names.update(|names| {
				names.insert(cluster_id.to_string(), trimmed.to_string());
			});
		}
		set_editing_cluster.set(None);
	};

	let delete_paper_sidebar = delete_paper.clone();
	let palette_sidebar = palette.clone();
	let palette_detail = palette.clone();

	view! {
		<main class="page page-project">
			<header class="page-header">
				<div>
					<h1>{move || project.get().map(|p| p.name).unwrap_or_default()}</h1>
					{move || {
						project
							.get()
							.and_then(|p| p.description)
							.map(|d| view! { <p class="subtitle">{d}</p> })
					}}
				</div>
				<div class="header-actions">
					<button on:click=move |_| set_show_upload.set(true)>"+ Upload Paper"</button>
					<button
						disabled=move || {
							cluster_busy.get()
								|| paper_list.with(|p| p.len() < MIN_PAPERS_FOR_CLUSTERING)
						}
						on:click=run_clustering
					>
						{move || {
							if cluster_busy.get() { "Clustering..." } else { "Analyze & Cluster" }
						}}
					</button>
				</div>
			</header>

			{move || error.get().map(|msg| view! { <p class="alert alert-error">{msg}</p> })}

			{move || {
				show_upload.get().then(|| view! {
					<form class="upload-form" on:submit=upload.clone()>
						<label>
							"PDF file"
							<input type="file" accept=".pdf,application/pdf" node_ref=file_input required />
						</label>
						<label>
							"Title (optional, extracted from the PDF when blank)"
							<input
								type="text"
								prop:value=upload_title
								on:input=move |ev| set_upload_title.set(event_target_value(&ev))
							/>
						</label>
						<div class="form-actions">
							<button type="button" on:click=move |_| set_show_upload.set(false)>
								"Cancel"
							</button>
							<button type="submit" disabled=uploading>
								{move || if uploading.get() { "Uploading..." } else { "Upload" }}
							</button>
						</div>
					</form>
				})
			}}

			<div class="project-layout">
				<aside class="paper-sidebar">
					<h2>{move || format!("Papers ({})", paper_list.with(Vec::len))}</h2>
					{move || {
						if loading.get() {
							view! { <p class="muted">"Loading..."</p> }.into_any()
						} else if paper_list.with(Vec::is_empty) {
							view! {
								<p class="muted">
									"Upload at least two papers, then run clustering to build the concept map."
								</p>
							}
							.into_any()
						} else {
							let mut grouped: BTreeMap<u32, Vec<Paper>> = BTreeMap::new();
							for paper in paper_list.get() {
								grouped
									.entry(paper.cluster_id.unwrap_or(0))
									.or_default()
									.push(paper);
							}
							let palette = palette_sidebar.clone();
							let delete_paper = delete_paper_sidebar.clone();
							grouped
								.into_iter()
								.map(|(cluster_id, cluster_papers)| {
									let dot_color = palette.color_for(cluster_id).to_css();
									let delete_paper = delete_paper.clone();
									view! {
										<section class="cluster-group">
											<header class="cluster-header">
												<span
													class="cluster-dot"
													style=format!("background: {}", dot_color)
												/>
												{move || {
													if editing_cluster.get() == Some(cluster_id) {
														view! {
															<input
																type="text"
																prop:value=rename_value
																on:input=move |ev| {
																	set_rename_value
																		.set(event_target_value(&ev))
																}
																on:blur=move |_| commit_rename(cluster_id)
															/>
														}
														.into_any()
													} else {
														let label = cluster_names.with(|names| {
															truncate(
																&cluster_label(names, cluster_id),
																CLUSTER_NAME_MAX,
															)
														});
														view! {
															<span
																class="cluster-name"
																on:dblclick=move |_| begin_rename(cluster_id)
															>
																{label}
															</span>
														}
														.into_any()
													}
												}}
											</header>
											<ul>
												{cluster_papers
													.into_iter()
													.map(|paper| {
														let paper_id = paper.id.clone();
														let delete_paper = delete_paper.clone();
														view! {
															<li class="paper-row">
																<div>
																	<span class="paper-title">
																		{paper
																			.title
																			.clone()
																			.unwrap_or_else(|| {
																				"Untitled".to_string()
																			})}
																	</span>
																	{paper.authors.clone().map(|authors| {
																		view! {
																			<span class="paper-authors muted">
																				{truncate(&authors, AUTHORS_MAX)}
																			</span>
																		}
																	})}
																</div>
																<button
																	class="danger"
																	on:click=move |_| {
																		delete_paper(paper_id.clone())
																	}
																>
																	"Delete"
																</button>
															</li>
														}
													})
													.collect_view()}
											</ul>
										</section>
									}
								})
								.collect_view()
								.into_any()
						}
					}}
				</aside>

				<section class="graph-panel">
					{move || {
						if graph.with(|g| g.as_ref().is_none_or(|p| p.nodes.is_empty())) {
							view! {
								<div class="empty-state">
									<p class="muted">
										"Run \"Analyze & Cluster\" to generate the concept map."
									</p>
								</div>
							}
							.into_any()
						} else {
							view! {
								<ConceptGraph
									data=Signal::derive(move || graph.get().unwrap_or_default())
									cluster_names=cluster_names
									on_node_click=Callback::new(move |node: GraphNode| {
										set_selected.set(Some(node))
									})
								/>
							}
							.into_any()
						}
					}}
				</section>

				{move || {
					selected.get().map(|node| {
						let cluster_id = node.cluster_id.unwrap_or(0);
						let badge_color = palette_detail.color_for(cluster_id).to_css();
						let badge_label =
							cluster_names.with(|names| cluster_label(names, cluster_id));
						let paper_id = node.id.to_string();
						let delete_paper = delete_paper.clone();
						view! {
							<aside class="detail-panel">
								<button class="close" on:click=move |_| set_selected.set(None)>
									"\u{00d7}"
								</button>
								<h2>
									{node.title.clone().unwrap_or_else(|| "Untitled".to_string())}
								</h2>
								{node.authors.clone().map(|authors| view! { <p>{authors}</p> })}
								{node
									.year
									.as_ref()
									.map(|year| view! { <p class="muted">{year.to_string()}</p> })}
								<span
									class="cluster-badge"
									style=format!("background: {}", badge_color)
								>
									{badge_label}
								</span>
								{node
									.abstract_text
									.clone()
									.map(|text| view! { <p class="abstract">{text}</p> })}
								<button class="danger" on:click=move |_| delete_paper(paper_id.clone())>
									"Delete paper"
								</button>
							</aside>
						}
					})
				}}
			</div>
		</main>
	}
	.into_any()
}
