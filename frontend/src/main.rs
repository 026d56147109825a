fn main() {
    #[cfg(target_arch = "wasm32")]
    tracing_wasm::set_as_global_default();

    tracing::info!("starting profile frontend");
    yew::Renderer::<profile_frontend::App>::new().render();
}
