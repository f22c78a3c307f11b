//! Leptos component wrapping the concept-map canvas.
//!
//! The component creates an HTML canvas sized to its container and wires up
//! mouse/wheel handlers for panning, zooming, hover tooltips, and node
//! clicks. A `requestAnimationFrame` loop advances hover animations and
//! redraws each frame. Any change to the dataset, the cluster name table, or
//! the palette rebuilds the scene from scratch; the previous tooltip overlay
//! is disposed before the new one is mounted.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::GraphScene;
use super::theme::ClusterPalette;
use super::tooltip::{Tooltip, TooltipContent};
use super::types::{ClusterNames, GraphNode, GraphPayload};

/// Frame delta assumed by the animation loop, seconds.
const FRAME_DT: f64 = 0.016;
/// Pointer travel below this counts as a click rather than a pan.
const CLICK_TRAVEL_PX: f64 = 4.0;

/// Bundles one dataset's scene with its drawing context, display tables, and
/// the tooltip overlay it owns.
struct GraphContext {
	scene: GraphScene,
	ctx: CanvasRenderingContext2d,
	palette: ClusterPalette,
	names: ClusterNames,
	tooltip: Option<Tooltip>,
}

/// Renders an interactive concept map of paper clusters on a canvas element.
///
/// Node positions come precomputed from the clustering backend; the component
/// only scales them into the container. Clicking a node invokes
/// `on_node_click` synchronously with the original payload node.
#[component]
pub fn ConceptGraph(
	/// Graph payload; re-renders from scratch whenever it changes.
	#[prop(into)]
	data: Signal<GraphPayload>,
	/// Sparse cluster label table for tooltips.
	#[prop(into)]
	cluster_names: Signal<ClusterNames>,
	/// Cluster color table; defaults to the built-in palette.
	#[prop(optional)]
	palette: Option<ClusterPalette>,
	/// Invoked when a node is clicked.
	#[prop(into)]
	on_node_click: Callback<GraphNode>,
) -> impl IntoView {
	let palette = palette.unwrap_or_default();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let running = Rc::new(Cell::new(true));

	let (context_init, animate_init, running_init) =
		(context.clone(), animate.clone(), running.clone());
	let palette_init = palette.clone();
	Effect::new(move |_| {
		let payload = data.get();
		let names = cluster_names.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();

		// Tear down the previous dataset's visuals, tooltip included, before
		// anything new is drawn. Handlers check the shared context, so no
		// interaction from the old render can fire afterward.
		if let Some(previous) = context_init.borrow_mut().take() {
			if let Some(tooltip) = previous.tooltip {
				tooltip.dispose();
			}
		}

		let (w, h) = (
			canvas
				.parent_element()
				.map(|p| p.client_width() as f64)
				.unwrap_or(0.0),
			canvas
				.parent_element()
				.map(|p| p.client_height() as f64)
				.unwrap_or(0.0),
		);
		let scene = GraphScene::new(&payload, w, h);
		canvas.set_width(scene.width as u32);
		canvas.set_height(scene.height as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			return;
		};

		if payload.nodes.is_empty() {
			// Nothing to draw; leave the surface cleared.
			ctx.clear_rect(0.0, 0.0, scene.width, scene.height);
			return;
		}

		let tooltip = web_sys::window()
			.and_then(|w| w.document())
			.and_then(|d| Tooltip::mount(&d));

		*context_init.borrow_mut() = Some(GraphContext {
			scene,
			ctx,
			palette: palette_init.clone(),
			names,
			tooltip,
		});

		// One persistent animation loop for the component's lifetime.
		if animate_init.borrow().is_none() {
			let (context_anim, animate_inner, running_anim) = (
				context_init.clone(),
				animate_init.clone(),
				running_init.clone(),
			);
			*animate_init.borrow_mut() = Some(Closure::new(move || {
				if !running_anim.get() {
					return;
				}
				if let Some(ref mut c) = *context_anim.borrow_mut() {
					c.scene.tick(FRAME_DT);
					render::render(&c.scene, &c.ctx, &c.palette);
				}
				if let Some(ref cb) = *animate_inner.borrow() {
					if let Some(window) = web_sys::window() {
						let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
					}
				}
			}));
			if let (Some(window), Some(cb)) =
				(web_sys::window(), &*animate_init.borrow())
			{
				let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_coords(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_md.borrow_mut() {
			c.scene.pan.active = true;
			c.scene.pan.start_x = x;
			c.scene.pan.start_y = y;
			c.scene.pan.origin_x = c.scene.transform.x;
			c.scene.pan.origin_y = c.scene.transform.y;
			c.scene.pan.travel = 0.0;
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_coords(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			if c.scene.pan.active {
				let (dx, dy) = (x - c.scene.pan.start_x, y - c.scene.pan.start_y);
				c.scene.pan.travel = c.scene.pan.travel.max((dx * dx + dy * dy).sqrt());
				c.scene.transform.x = c.scene.pan.origin_x + dx;
				c.scene.transform.y = c.scene.pan.origin_y + dy;
				return;
			}

			let hovered = c.scene.node_at(x, y);
			let previous = c.scene.hover.hovered();
			c.scene.hover.set_hover(hovered);
			if let Some(tooltip) = &c.tooltip {
				match hovered {
					Some(idx) if previous != Some(idx) => {
						let content = TooltipContent::for_node(
							&c.scene.graph.nodes[idx],
							&c.palette,
							&c.names,
						);
						tooltip.show(&content, ev.client_x() as f64, ev.client_y() as f64);
					}
					Some(_) => {
						tooltip.move_to(ev.client_x() as f64, ev.client_y() as f64);
					}
					None => tooltip.hide(),
				}
			}
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_coords(canvas_ref, &ev) else {
			return;
		};
		// Resolve the click while borrowed, run the callback after releasing
		// the borrow so the caller may update signals that re-render us.
		let clicked = {
			let mut borrow = context_mu.borrow_mut();
			let Some(ref mut c) = *borrow else {
				return;
			};
			let was_click = c.scene.pan.active && c.scene.pan.travel < CLICK_TRAVEL_PX;
			c.scene.pan.active = false;
			if was_click {
				c.scene
					.node_at(x, y)
					.map(|idx| c.scene.graph.nodes[idx].node.clone())
			} else {
				None
			}
		};
		if let Some(node) = clicked {
			on_node_click.run(node);
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.scene.pan.active = false;
			c.scene.hover.set_hover(None);
			if let Some(tooltip) = &c.tooltip {
				tooltip.hide();
			}
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = canvas_coords(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			c.scene.transform.zoom_at(x, y, factor);
		}
	};

	let cleanup_state = leptos::__reexports::send_wrapper::SendWrapper::new((
		context.clone(),
		running.clone(),
	));
	on_cleanup(move || {
		let (context_cleanup, running_cleanup) = cleanup_state.take();
		running_cleanup.set(false);
		if let Some(c) = context_cleanup.borrow_mut().take() {
			if let Some(tooltip) = c.tooltip {
				tooltip.dispose();
			}
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="concept-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}

/// Pointer position relative to the canvas, in canvas pixels.
fn canvas_coords(
	canvas_ref: NodeRef<leptos::html::Canvas>,
	ev: &MouseEvent,
) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}
