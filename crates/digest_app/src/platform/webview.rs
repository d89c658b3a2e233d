//! Desktop window hosting the rendered page in a system webview.

use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use digest_core::{AppViewModel, Msg};
use digest_logging::{digest_debug, digest_error, digest_info};
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder};
use tao::window::WindowBuilder;
use wry::{WebView, WebViewBuilder};

use super::app::{Driver, Surface};
use super::ui::{actions, page, render};

#[derive(Debug)]
enum UserEvent {
    Dispatch(Msg),
}

struct WebviewSurface<'a> {
    webview: &'a WebView,
}

impl Surface for WebviewSurface<'_> {
    fn render(&mut self, view: &AppViewModel) {
        let script = render::render(view).to_script();
        if let Err(err) = self.webview.evaluate_script(&script) {
            digest_error!("Failed to update page: {}", err);
        }
    }

    fn scroll_to_top(&mut self) {
        let _ = self.webview.evaluate_script("window.scrollTo(0, 0);");
    }
}

pub(crate) fn run(
    mut driver: Driver,
    msg_tx: mpsc::Sender<Msg>,
    msg_rx: mpsc::Receiver<Msg>,
) -> anyhow::Result<()> {
    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();
    let proxy = event_loop.create_proxy();

    // Client completions and toast timers arrive on `msg_rx` from other threads.
    thread::spawn(move || {
        while let Ok(msg) = msg_rx.recv() {
            if proxy.send_event(UserEvent::Dispatch(msg)).is_err() {
                break;
            }
        }
    });

    let window = WindowBuilder::new()
        .with_title("AI Digest")
        .with_inner_size(tao::dpi::LogicalSize::new(1100.0, 800.0))
        .build(&event_loop)
        .context("failed to create window")?;

    let builder = WebViewBuilder::new()
        .with_html(page::shell())
        .with_ipc_handler(move |request: wry::http::Request<String>| {
            let body = request.body().as_str();
            digest_debug!("IPC {}", body);
            let _ = msg_tx.send(actions::parse_action(body));
        })
        .with_devtools(cfg!(debug_assertions));

    #[cfg(target_os = "linux")]
    let webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        let vbox = window
            .default_vbox()
            .context("window has no GTK container")?;
        builder.build_gtk(vbox).context("failed to create webview")?
    };

    #[cfg(not(target_os = "linux"))]
    let webview = builder.build(&window).context("failed to create webview")?;

    digest_info!("Webview ready");

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;
        // Keeps the window alive for as long as the loop runs.
        let _ = &window;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                digest_info!("Window closed");
                *control_flow = ControlFlow::Exit;
            }
            Event::UserEvent(UserEvent::Dispatch(msg)) => {
                let mut surface = WebviewSurface { webview: &webview };
                driver.dispatch(msg, &mut surface);
            }
            _ => {}
        }
    });
}
