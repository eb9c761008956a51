//! Finance Practice entry point
//!
//! Handles platform-specific initialization and wires page events to the session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlInputElement, KeyboardEvent, MouseEvent};

    use finance_practice::platform::dom::DomRenderer;
    use finance_practice::platform::html::{PRACTICE_AGAIN_BUTTON_ID, SHOW_SOLUTION_BUTTON_ID};
    use finance_practice::platform::storage::LocalStorage;
    use finance_practice::{PageConfig, ProblemSession, ProblemSet, ProgressStore, Renderer, SessionView};

    // Page globals may be `const` declarations, which are not window properties
    #[wasm_bindgen(inline_js = "
        export function page_problems_json() {
            return typeof problems !== 'undefined' ? JSON.stringify(problems) : undefined;
        }

        export function page_config_json() {
            if (typeof window.pageConfig !== 'undefined') {
                return JSON.stringify(window.pageConfig);
            }
            return typeof pageConfig !== 'undefined' ? JSON.stringify(pageConfig) : undefined;
        }
    ")]
    extern "C" {
        fn page_problems_json() -> Option<String>;
        fn page_config_json() -> Option<String>;
    }

    /// Widget instance holding the session and its renderer
    struct App {
        session: ProblemSession<LocalStorage>,
        renderer: DomRenderer,
    }

    impl App {
        fn redraw(&mut self) {
            let view = SessionView::from_session(&self.session);
            self.renderer.render(&view);
        }

        fn submit(&mut self, document: &Document) {
            let raw = document
                .get_element_by_id("answerInput")
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                .map(|input| input.value())
                .unwrap_or_default();
            let outcome = self.session.submit_answer(&raw);
            log::debug!("Submitted {:?}: {:?}", raw, outcome);
            self.redraw();
        }
    }

    fn load_config() -> PageConfig {
        match page_config_json().map(|json| PageConfig::from_json(&json)) {
            Some(Ok(config)) => config,
            Some(Err(e)) => {
                log::warn!("Ignoring page config: {}", e);
                PageConfig::default()
            }
            None => {
                log::warn!("No pageConfig defined, progress will not be saved");
                PageConfig::default()
            }
        }
    }

    fn load_problems() -> Option<ProblemSet> {
        let json = page_problems_json()?;
        match ProblemSet::from_json(&json) {
            Ok(problems) => Some(problems),
            Err(e) => {
                log::error!("Could not load problems: {}", e);
                None
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {e}").into());
        }

        log::info!("Finance practice starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document, nothing to render into");
            return;
        };

        let Some(problems) = load_problems() else {
            log::warn!("No problems on this page");
            return;
        };

        let config = load_config();
        let store = ProgressStore::new(LocalStorage::open());
        let session = ProblemSession::new(problems, config, store);

        let app = Rc::new(RefCell::new(App {
            session,
            renderer: DomRenderer::new(document.clone()),
        }));
        app.borrow_mut().redraw();

        setup_click_handler(&document, app.clone());
        setup_enter_key(&document, app);

        log::info!("Finance practice running!");
    }

    /// One delegated click listener; the feedback and summary buttons are created dynamically
    fn setup_click_handler(document: &Document, app: Rc<RefCell<App>>) {
        let doc = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let Some(target) = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest("button").ok().flatten())
            else {
                return;
            };

            let mut a = app.borrow_mut();
            match target.id().as_str() {
                "submitBtn" => a.submit(&doc),
                "nextBtn" => {
                    a.session.advance();
                    a.redraw();
                }
                "prevBtn" => {
                    if a.session.retreat() {
                        a.redraw();
                    }
                }
                id if id == SHOW_SOLUTION_BUTTON_ID => {
                    a.session.show_solution();
                    a.redraw();
                }
                id if id == PRACTICE_AGAIN_BUTTON_ID => {
                    // The summary replaced the problem card, so rebuild the page
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().reload();
                    }
                }
                _ => {}
            }
        });
        let _ = document.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_enter_key(document: &Document, app: Rc<RefCell<App>>) {
        let Some(input) = document.get_element_by_id("answerInput") else {
            return;
        };
        let doc = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if event.key() != "Enter" {
                return;
            }
            let mut a = app.borrow_mut();
            if a.session.state().accepts_submission() {
                a.submit(&doc);
            }
        });
        let _ = input.add_event_listener_with_callback("keypress", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Finance practice (native) starting...");
    log::info!("The widget runs in the browser - build with `trunk serve` for the web version");

    println!("\nRunning practice session walkthrough...");
    walkthrough();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive one problem through the full hint ladder against in-memory storage
#[cfg(not(target_arch = "wasm32"))]
fn walkthrough() {
    use finance_practice::view::CardView;
    use finance_practice::{
        MemoryStorage, PageConfig, ProblemSession, ProblemSet, ProgressStore, SessionView,
    };

    const SAMPLE: &str = r#"[{
        "id": "tvm-fv-1",
        "topic": "Future Value",
        "difficulty": "easy",
        "problem_text": "You deposit $1,000 today at 5% annual interest. What is it worth in 1 year?",
        "formula": "FV = PV (1 + r)",
        "correct_answer": 1050,
        "unit": "currency",
        "solution_steps": ["FV = 1000 \\times 1.05", "FV = 1050"],
        "hints": {
            "level_1": "Interest compounds once.",
            "level_2": "Multiply by (1 + r).",
            "level_3": "1000 x 1.05"
        }
    }]"#;

    let problems = match ProblemSet::from_json(SAMPLE) {
        Ok(problems) => problems,
        Err(e) => {
            log::error!("Sample problems invalid: {}", e);
            return;
        }
    };
    let mut session = ProblemSession::new(
        problems,
        PageConfig::new("demo"),
        ProgressStore::new(MemoryStorage::new()),
    );

    for raw in ["a lot", "1000", "1100", "900", "1200"] {
        let outcome = session.submit_answer(raw);
        println!("  {raw:>6} -> {outcome:?}");
    }

    session.advance();
    if let CardView::Summary(summary) = SessionView::from_session(&session).card {
        println!("  {} ({})", summary.score, summary.message);
    }
    println!("✓ Walkthrough finished");
}
