use crate::config::{self, Config};
use crate::events::{AppEvent, CountdownRequest};
use crate::gui::orb::{self, Orb};
use crate::gui::theme::{self, ThemeColors};
use crate::sys::countdown;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Instant;
use ticker::countdown::{CountdownState, TICK_PERIOD, TOTAL_SECONDS};
use ticker::task::TaskGuard;

pub struct AppModel {
    pub orb: Rc<RefCell<Orb>>,
    pub start: StartGuard,
    pub size: i32,
    pub requests: async_channel::Sender<CountdownRequest>,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
    countdown_task: TaskGuard,
}

#[derive(Debug)]
pub enum AppMsg {
    Start,
    Present,
    Countdown(CountdownState),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Start => AppMsg::Start,
            AppEvent::Present => AppMsg::Present,
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

/// Lets at most one start request through until the countdown reports it is idle again.
#[derive(Debug, Default)]
pub struct StartGuard {
    running: bool,
}

impl StartGuard {
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Queues a start unless one is already in flight. Returns whether a request was sent.
    pub fn request(&mut self, requests: &async_channel::Sender<CountdownRequest>) -> bool {
        if self.running {
            log::debug!("Countdown already running, ignoring start");
            return false;
        }
        match requests.try_send(CountdownRequest::Start) {
            Ok(()) => {
                self.running = true;
                true
            }
            Err(e) => {
                log::error!("Failed to start countdown: {}", e);
                false
            }
        }
    }

    pub fn observe(&mut self, state: &CountdownState) {
        self.running = state.is_running;
    }
}

pub fn start_label() -> String {
    format!("Start {}s countdown", TOTAL_SECONDS)
}

fn orb_size(config: &Config) -> i32 {
    config.appearance.size.round().max(1.0) as i32
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Tock"),
            set_default_width: 320,
            set_default_height: 360,

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_valign: gtk::Align::Center,
                set_halign: gtk::Align::Center,

                #[name = "drawing_area"]
                gtk::DrawingArea {
                    #[watch]
                    set_content_width: model.size,
                    #[watch]
                    set_content_height: model.size,
                    add_css_class: "tock-orb",
                },

                gtk::Revealer {
                    set_transition_type: gtk::RevealerTransitionType::SlideDown,
                    #[watch]
                    set_reveal_child: !model.start.is_running(),

                    gtk::Button {
                        set_label: &start_label(),
                        set_halign: gtk::Align::Center,
                        add_css_class: "tock-start",
                        connect_clicked => AppMsg::Start,
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, rx) = init;

        theme::load_css();

        let (requests, requests_rx) = async_channel::bounded(1);
        let (updates_tx, updates_rx) = async_channel::unbounded();
        let countdown_task = TaskGuard::new(relm4::spawn(countdown::run_service(
            requests_rx,
            updates_tx,
            TICK_PERIOD,
        )));

        let model = AppModel {
            orb: Rc::new(RefCell::new(Orb::new(&config.appearance))),
            start: StartGuard::default(),
            size: orb_size(&config),
            requests,
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
            countdown_task,
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let orb_draw = model.orb.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = orb::draw(
                    cr,
                    &orb_draw.borrow(),
                    &colors,
                    width as f64,
                    height as f64,
                    Instant::now(),
                ) {
                    log::error!("Drawing error: {}", e);
                }
            });

        // redraw every frame while animating, plus once more to land on the target
        let orb_tick = model.orb.clone();
        let settled = Cell::new(true);
        widgets
            .drawing_area
            .add_tick_callback(move |drawing_area, _| {
                let animating = orb_tick.borrow().is_animating(Instant::now());
                if animating || !settled.get() {
                    drawing_area.queue_draw();
                }
                settled.set(!animating);
                glib::ControlFlow::Continue
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(state) = updates_rx.recv().await {
                sender_clone.input(AppMsg::Countdown(state));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Start => {
                self.start.request(&self.requests);
            }
            AppMsg::Present => {
                self.root.present();
            }
            AppMsg::Countdown(state) => {
                self.start.observe(&state);
                self.orb.borrow_mut().apply(&state, Instant::now());
                self.drawing_area.queue_draw();
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.size = orb_size(&new_config);
                    self.orb.borrow_mut().restyle(&new_config.appearance);
                    self.drawing_area.queue_draw();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }

    fn shutdown(&mut self, _widgets: &mut Self::Widgets, _output: relm4::Sender<Self::Output>) {
        self.countdown_task.cancel();
    }
}
