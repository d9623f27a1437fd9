use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use crate::config::{ClientConfig, persist_hud_visible};
use crate::model::UserColor;
use crate::state::hud::{self, HudState};
use crate::state::{Board, grid, store};
use crate::sync::{self, SyncSink};
use crate::util::{clog, now_ms};

#[derive(Properties, PartialEq, Clone)]
pub struct BoardViewProps {
    pub config: ClientConfig,
}

fn draw_hud(ctx: &CanvasRenderingContext2d, state: &HudState, last_sync_ms: Option<f64>, now: f64) {
    let lines = state.lines(last_sync_ms, now);
    // 90px fits the interval row plus the three hints
    let panel_h = 90.0 + 20.0 * (HudState::row_count(&lines).saturating_sub(4) as f64);
    ctx.set_fill_style_str(hud::PANEL_FILL);
    ctx.fill_rect(20.0, 20.0, 300.0, panel_h);
    ctx.set_font("20px sans-serif");
    for line in &lines {
        ctx.set_fill_style_str(line.color);
        ctx.fill_text(&line.text, 22.0, 40.0 + 20.0 * line.row as f64).ok();
    }
}

fn paint(canvas: &HtmlCanvasElement, board: &mut Board) {
    let Some(ctx) = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
    else {
        return;
    };
    let w = canvas.width() as f64;
    let h = canvas.height() as f64;
    let sq = board.square_size();

    ctx.set_fill_style_str(grid::BACKGROUND);
    ctx.fill_rect(0.0, 0.0, w, h);
    ctx.set_stroke_style_str(grid::LINE_COLOR);
    let cam = &board.camera;
    for s in grid::visible_squares(cam.scroll_x, cam.scroll_y, w, h, sq, board.board_radius) {
        ctx.stroke_rect(s.x, s.y, s.size, s.size);
    }
    board.camera.wrap_scroll();

    let cells = board.store.snapshot();
    for cell in cells.iter() {
        let (x, y) = store::cell_origin(cell, board.camera.real_scroll_x, board.camera.real_scroll_y, sq);
        ctx.set_fill_style_str(&cell.fill_style());
        ctx.fill_rect(x, y, sq, sq);
    }

    if board.hud.shown() {
        draw_hud(&ctx, &board.hud, board.store.last_update_ms(), now_ms());
    }
    board.camera.advance_frame();
}

#[function_component(BoardView)]
pub fn board_view(props: &BoardViewProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        let config = props.config.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("no global `window` exists");
            let canvas: HtmlCanvasElement = canvas_ref
                .cast::<HtmlCanvasElement>()
                .expect("canvas_ref not attached to a canvas element");

            let fit_canvas = {
                let canvas = canvas.clone();
                let window = window.clone();
                move || {
                    let width = window
                        .inner_width()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(800.0);
                    let height = window
                        .inner_height()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(600.0);
                    canvas.set_width(width.max(0.0) as u32);
                    canvas.set_height(height.max(0.0) as u32);
                }
            };
            fit_canvas();

            let color = UserColor::random();
            let board = Rc::new(RefCell::new(Board::new(&config, color)));
            clog(&format!(
                "board ready: transport={:?} color=rgb({},{},{})",
                config.transport, color.r, color.g, color.b
            ));

            let sink: SyncSink = {
                let board = board.clone();
                Rc::new(move |event| {
                    let mut b = board.borrow_mut();
                    b.apply(event, now_ms());
                    clog(&format!("store holds {} cells", b.store.len()));
                })
            };
            let channel = sync::connect(&config, sink);
            channel.start();

            // Animation frame loop: paint, then apply the pan delta
            let raf_id = Rc::new(RefCell::new(None));
            let closure_cell: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
            {
                let raf_id_clone = raf_id.clone();
                let closure_cell_clone = closure_cell.clone();
                let window_loop = window.clone();
                let canvas = canvas.clone();
                let board = board.clone();
                *closure_cell.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                    if canvas.is_connected() {
                        paint(&canvas, &mut board.borrow_mut());
                    }
                    if let Some(cb) = closure_cell_clone.borrow().as_ref() {
                        if let Ok(id) = window_loop.request_animation_frame(cb.as_ref().unchecked_ref()) {
                            *raf_id_clone.borrow_mut() = Some(id);
                        }
                    }
                }) as Box<dyn FnMut()>));
                if let Some(cb) = closure_cell.borrow().as_ref() {
                    if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                        *raf_id.borrow_mut() = Some(id);
                    }
                }
            }

            // Mouse events
            let mousedown_cb = {
                let board = board.clone();
                Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                    if e.button() == 0 {
                        board
                            .borrow_mut()
                            .pointer_down(e.offset_x() as f64, e.offset_y() as f64);
                    }
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("mousedown", mousedown_cb.as_ref().unchecked_ref())
                .ok();
            let mousemove_cb = {
                let board = board.clone();
                Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                    board
                        .borrow_mut()
                        .pointer_move(e.offset_x() as f64, e.offset_y() as f64);
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("mousemove", mousemove_cb.as_ref().unchecked_ref())
                .ok();
            let mouseup_cb = {
                let board = board.clone();
                let channel = channel.clone();
                Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                    let created = board
                        .borrow_mut()
                        .pointer_up(e.offset_x() as f64, e.offset_y() as f64);
                    if let Some(cell) = created {
                        clog(&format!("clicked x: {} y: {}", cell.x, cell.y));
                        channel.create(cell);
                    }
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("mouseup", mouseup_cb.as_ref().unchecked_ref())
                .ok();
            // H toggles the HUD
            let keydown_cb = {
                let board = board.clone();
                Closure::wrap(Box::new(move |e: web_sys::KeyboardEvent| {
                    if !e.key().eq_ignore_ascii_case("h") {
                        return;
                    }
                    let mut b = board.borrow_mut();
                    if b.hud.enabled {
                        persist_hud_visible(b.hud.toggle());
                    }
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref())
                .ok();
            let resize_cb = {
                let fit_canvas = fit_canvas.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    fit_canvas();
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                .ok();

            // Cleanup
            let window_clone = window.clone();
            move || {
                channel.stop();
                let _ = canvas.remove_event_listener_with_callback(
                    "mousedown",
                    mousedown_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "mousemove",
                    mousemove_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "mouseup",
                    mouseup_cb.as_ref().unchecked_ref(),
                );
                let _ = window_clone.remove_event_listener_with_callback(
                    "keydown",
                    keydown_cb.as_ref().unchecked_ref(),
                );
                let _ = window_clone.remove_event_listener_with_callback(
                    "resize",
                    resize_cb.as_ref().unchecked_ref(),
                );
                if let Some(id) = *raf_id.borrow() {
                    let _ = window_clone.cancel_animation_frame(id);
                }
                closure_cell.borrow_mut().take();
            }
        });
    }

    html! {
        <div style="position:fixed; inset:0; overflow:hidden; background:#000;">
            <canvas ref={canvas_ref} style="display:block; cursor:crosshair;"></canvas>
        </div>
    }
}
