use crate::config;
use crate::events::AppEvent;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::wheel::{self, FrameOutcome, Landing, ReloadOutcome, Session};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub const DEFAULT_WINDOW_SIZE: i32 = 560;

pub struct AppModel {
    pub session: Rc<RefCell<Session>>,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    GestureBegin,
    GestureRelease,
    Settled(Landing),
    Unmapped,
    Recover,
    Close,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Session, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Fortuna"),
            set_default_size: (DEFAULT_WINDOW_SIZE, DEFAULT_WINDOW_SIZE),
            add_css_class: "fortuna-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Close);
                        return glib::Propagation::Stop;
                    }
                    if key == gtk::gdk::Key::r || key == gtk::gdk::Key::R {
                        sender.input(AppMsg::Recover);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "fortuna-drawing-area",

                add_controller = gtk::GestureDrag {
                    connect_drag_begin[sender] => move |_, _, _| {
                        sender.input(AppMsg::GestureBegin);
                    },
                    connect_drag_end[sender] => move |_, _, _| {
                        sender.input(AppMsg::GestureRelease);
                    },
                },

                connect_unmap[sender] => move |_| {
                    sender.input(AppMsg::Unmapped);
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (session, rx) = init;

        theme::load_css();

        let model = AppModel {
            session: Rc::new(RefCell::new(session)),
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let session_draw = model.session.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                let session = session_draw.borrow();
                if let Err(e) = wheel::draw(
                    cr,
                    &session.wheel().view(),
                    &colors,
                    f64::from(width),
                    f64::from(height),
                ) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::GestureBegin => {
                self.session.borrow_mut().begin();
            }
            AppMsg::GestureRelease => {
                if self.session.borrow_mut().release() {
                    self.start_ticking(sender);
                }
            }
            AppMsg::Settled(landing) => {
                self.root
                    .set_title(Some(&format!("Fortuna: {}", landing.label)));
            }
            AppMsg::Unmapped => {
                if self.session.borrow_mut().abort() {
                    log::warn!("Spin interrupted; press R or edit the config to reset the wheel");
                }
            }
            AppMsg::Recover => match self.session.borrow_mut().recover() {
                Ok(true) => {
                    self.root.set_title(Some("Fortuna"));
                    self.drawing_area.queue_draw();
                }
                Ok(false) => {}
                Err(e) => log::error!("Failed to re-create wheel: {}", e),
            },
            AppMsg::Close => self.root.close(),
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => match self.session.borrow_mut().reload(new_config) {
                    Ok(ReloadOutcome::Unchanged) => {}
                    Ok(ReloadOutcome::Deferred) => {
                        log::info!("Configuration reload deferred until the wheel settles")
                    }
                    Ok(outcome) => {
                        self.drawing_area.queue_draw();
                        log::info!("Configuration reloaded ({:?})", outcome);
                    }
                    Err(e) => log::error!("Failed to apply config: {}", e),
                },
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

impl AppModel {
    /// Drives the running spin from the frame clock until it settles.
    fn start_ticking(&self, sender: ComponentSender<Self>) {
        let session = self.session.clone();
        self.drawing_area.add_tick_callback(move |area, clock| {
            let outcome = session.borrow_mut().advance(clock.frame_time());
            area.queue_draw();
            match outcome {
                FrameOutcome::Running => glib::ControlFlow::Continue,
                FrameOutcome::Settled(landing) => {
                    sender.input(AppMsg::Settled(landing));
                    glib::ControlFlow::Break
                }
                FrameOutcome::Idle => glib::ControlFlow::Break,
            }
        });
    }
}
