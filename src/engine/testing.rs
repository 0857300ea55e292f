//! ### English
//! Recording fake for `EglApi` + `GlesApi` used by unit tests.
//!
//! Every call is appended to an ordered log, EGL/GL objects are tracked as live sets, and each
//! fallible step can be forced to fail. Clones share state, so one clone can be moved onto the
//! render thread while the test inspects another.
//!
//! The display follows EGL's non-counted initialization: one `eglTerminate` ends it no matter
//! how many times it was initialized.
//!
//! ### 中文
//! 单元测试使用的 `EglApi` + `GlesApi` 录制型假实现。
//!
//! 每次调用都会追加到有序日志中，EGL/GL 对象以存活集合跟踪，每个可失败步骤都可强制失败。
//! 克隆体共享状态，因此可以把一个克隆移到渲染线程，同时在测试中检查另一个。
//!
//! display 遵循 EGL 不计数的初始化语义：无论初始化多少次，一次 `eglTerminate` 即将其终止。

use std::collections::{HashMap, HashSet};
use std::ffi::c_void;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::engine::egl::{
    EGL_NATIVE_VISUAL_ID, EGL_SUCCESS, EGLint, EglApi, EglConfig, EglContext, EglDisplay,
    EglSurface,
};
use crate::engine::gles::{GlesApi, ShaderStage};
use crate::engine::window::NativeWindow;

/// Native visual id reported for the fake config (`WINDOW_FORMAT_RGB_565`).
pub(crate) const FAKE_VISUAL_ID: EGLint = 4;

const EGL_BAD_ALLOC: EGLint = 0x3003;
const EGL_BAD_MATCH: EGLint = 0x3009;
const EGL_BAD_NATIVE_WINDOW: EGLint = 0x300B;

const FAKE_DISPLAY: usize = 0xD15;
const FAKE_CONFIG: usize = 0xC0F;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Call {
    GetDisplay,
    Initialize,
    ChooseConfig(Vec<EGLint>),
    CreateContext(Vec<EGLint>),
    GetConfigAttrib(EGLint),
    CreateWindowSurface { window: usize },
    MakeCurrent { surface: usize, context: usize },
    SwapBuffers { surface: usize },
    DestroySurface(usize),
    DestroyContext(usize),
    Terminate,

    CreateShader(ShaderStage),
    ShaderSource(u32),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram,
    AttachShader { program: u32, shader: u32 },
    BindAttribLocation { program: u32, index: u32, name: String },
    LinkProgram(u32),
    DeleteProgram(u32),
    UseProgram(u32),
    Uniform1i { location: i32, value: i32 },
    ClearColor,
    Clear,
    Viewport { width: i32, height: i32 },
    GenTexture,
    ActiveTexture0,
    BindTexture(u32),
    ConfigureTexture,
    TexImage { width: i32, height: i32, pixels: Vec<u8> },
    DisableTextureUnit,
    DeleteTexture(u32),
    GenBuffer,
    BindArrayBuffer(u32),
    UploadVertices(usize),
    VertexAttribPointer { index: u32, components: i32, stride: i32, offset: u32 },
    EnableVertexAttribArray(u32),
    DrawTriangleFan { first: i32, count: i32 },
    DeleteBuffer(u32),
}

impl Call {
    pub(crate) fn is_egl(&self) -> bool {
        matches!(
            self,
            Call::GetDisplay
                | Call::Initialize
                | Call::ChooseConfig(_)
                | Call::CreateContext(_)
                | Call::GetConfigAttrib(_)
                | Call::CreateWindowSurface { .. }
                | Call::MakeCurrent { .. }
                | Call::SwapBuffers { .. }
                | Call::DestroySurface(_)
                | Call::DestroyContext(_)
                | Call::Terminate
        )
    }
}

/// Steps that can be forced to fail.
#[derive(Clone, Debug, Default)]
pub(crate) struct Failures {
    pub(crate) display: bool,
    pub(crate) initialize: bool,
    pub(crate) choose_config: bool,
    pub(crate) create_context: bool,
    pub(crate) config_attrib: bool,
    pub(crate) create_surface: bool,
    pub(crate) make_current: bool,
    pub(crate) swap: bool,
    pub(crate) link: bool,
    pub(crate) create_program: bool,
}

#[derive(Default)]
pub(crate) struct FakeState {
    pub(crate) calls: Vec<Call>,
    pub(crate) failures: Failures,
    pub(crate) last_error: EGLint,
    next_id: usize,
    pub(crate) initialized: bool,
    pub(crate) contexts: HashSet<usize>,
    pub(crate) surfaces: HashMap<usize, usize>,
    pub(crate) current: Option<(usize, usize)>,
    pub(crate) shaders: HashMap<u32, String>,
    pub(crate) programs: HashSet<u32>,
    pub(crate) textures: HashSet<u32>,
    pub(crate) buffers: HashSet<u32>,
}

impl FakeState {
    fn alloc(&mut self) -> usize {
        self.next_id += 1;
        self.next_id
    }

    fn fail(&mut self, code: EGLint) {
        self.last_error = code;
    }
}

#[derive(Clone, Default)]
pub(crate) struct FakeGpu {
    state: Arc<Mutex<FakeState>>,
}

impl FakeGpu {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub(crate) fn fail(&self, f: impl FnOnce(&mut Failures)) {
        f(&mut self.state().failures);
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub(crate) fn take_calls(&self) -> Vec<Call> {
        std::mem::take(&mut self.state().calls)
    }

    /// `(display initialized as 0/1, live contexts, live surfaces)`
    pub(crate) fn live_egl_objects(&self) -> (usize, usize, usize) {
        let state = self.state();
        (usize::from(state.initialized), state.contexts.len(), state.surfaces.len())
    }

    /// `(live programs, live shaders, live textures, live buffers)`
    pub(crate) fn live_gl_objects(&self) -> (usize, usize, usize, usize) {
        let state = self.state();
        (
            state.programs.len(),
            state.shaders.len(),
            state.textures.len(),
            state.buffers.len(),
        )
    }

    /// Window each live surface was created for.
    pub(crate) fn surface_windows(&self) -> Vec<usize> {
        self.state().surfaces.values().copied().collect()
    }

    fn push(&self, call: Call) {
        self.state().calls.push(call);
    }

    fn record(&self, call: Call) -> MutexGuard<'_, FakeState> {
        let mut state = self.state();
        state.calls.push(call);
        state
    }
}

pub(crate) fn fake_window(addr: usize) -> NativeWindow {
    unsafe { NativeWindow::from_raw_borrowed(addr as *mut c_void) }.expect("non-null test window")
}

fn ptr(addr: usize) -> *mut c_void {
    addr as *mut c_void
}

impl EglApi for FakeGpu {
    fn get_default_display(&self) -> EglDisplay {
        let state = self.record(Call::GetDisplay);
        if state.failures.display {
            return EglDisplay::NULL;
        }
        EglDisplay::from_raw(ptr(FAKE_DISPLAY))
    }

    fn initialize(&self, _display: EglDisplay) -> Option<(EGLint, EGLint)> {
        let mut state = self.record(Call::Initialize);
        if state.failures.initialize {
            state.fail(EGL_BAD_ALLOC);
            return None;
        }
        state.initialized = true;
        Some((1, 4))
    }

    fn choose_config(&self, _display: EglDisplay, attribs: &[EGLint]) -> Option<EglConfig> {
        let state = self.record(Call::ChooseConfig(attribs.to_vec()));
        if state.failures.choose_config {
            return None;
        }
        Some(EglConfig::from_raw(ptr(FAKE_CONFIG)))
    }

    fn create_context(
        &self,
        _display: EglDisplay,
        _config: EglConfig,
        attribs: &[EGLint],
    ) -> EglContext {
        let mut state = self.record(Call::CreateContext(attribs.to_vec()));
        if state.failures.create_context {
            state.fail(EGL_BAD_MATCH);
            return EglContext::NULL;
        }
        let id = state.alloc();
        state.contexts.insert(id);
        EglContext::from_raw(ptr(id))
    }

    fn get_config_attrib(
        &self,
        _display: EglDisplay,
        _config: EglConfig,
        attribute: EGLint,
    ) -> Option<EGLint> {
        let mut state = self.record(Call::GetConfigAttrib(attribute));
        if state.failures.config_attrib || attribute != EGL_NATIVE_VISUAL_ID {
            state.fail(EGL_BAD_MATCH);
            return None;
        }
        Some(FAKE_VISUAL_ID)
    }

    fn create_window_surface(
        &self,
        _display: EglDisplay,
        _config: EglConfig,
        window: &NativeWindow,
    ) -> EglSurface {
        let window = window.as_ptr() as usize;
        let mut state = self.record(Call::CreateWindowSurface { window });
        // A window may back at most one live surface.
        if state.failures.create_surface || state.surfaces.values().any(|w| *w == window) {
            state.fail(EGL_BAD_NATIVE_WINDOW);
            return EglSurface::NULL;
        }
        let id = state.alloc();
        state.surfaces.insert(id, window);
        EglSurface::from_raw(ptr(id))
    }

    fn make_current(&self, _display: EglDisplay, surface: EglSurface, context: EglContext) -> bool {
        let surface = surface.as_raw() as usize;
        let context = context.as_raw() as usize;
        let mut state = self.record(Call::MakeCurrent { surface, context });
        if context == 0 {
            state.current = None;
            return true;
        }
        if state.failures.make_current {
            state.fail(EGL_BAD_MATCH);
            return false;
        }
        state.current = Some((surface, context));
        true
    }

    fn swap_buffers(&self, _display: EglDisplay, surface: EglSurface) -> bool {
        let surface = surface.as_raw() as usize;
        let mut state = self.record(Call::SwapBuffers { surface });
        if state.failures.swap {
            state.fail(EGL_BAD_NATIVE_WINDOW);
            return false;
        }
        true
    }

    fn destroy_surface(&self, _display: EglDisplay, surface: EglSurface) -> bool {
        let surface = surface.as_raw() as usize;
        let mut state = self.record(Call::DestroySurface(surface));
        state.surfaces.remove(&surface).is_some()
    }

    fn destroy_context(&self, _display: EglDisplay, context: EglContext) -> bool {
        let context = context.as_raw() as usize;
        let mut state = self.record(Call::DestroyContext(context));
        state.contexts.remove(&context)
    }

    fn terminate(&self, _display: EglDisplay) -> bool {
        let mut state = self.record(Call::Terminate);
        state.initialized = false;
        true
    }

    fn get_error(&self) -> EGLint {
        std::mem::replace(&mut self.state().last_error, EGL_SUCCESS)
    }

    fn get_proc_address(&self, _name: &str) -> *const c_void {
        std::ptr::null()
    }
}

impl GlesApi for FakeGpu {
    fn create_shader(&self, stage: ShaderStage) -> u32 {
        let mut state = self.record(Call::CreateShader(stage));
        let id = state.alloc() as u32;
        state.shaders.insert(id, String::new());
        id
    }

    fn shader_source(&self, shader: u32, source: &str) {
        let mut state = self.record(Call::ShaderSource(shader));
        state.shaders.insert(shader, source.to_string());
    }

    fn compile_shader(&self, shader: u32) {
        self.push(Call::CompileShader(shader));
    }

    fn shader_compiled(&self, shader: u32) -> bool {
        // Anything without an entry point is treated as malformed.
        self.state()
            .shaders
            .get(&shader)
            .is_some_and(|source| source.contains("void main()"))
    }

    fn shader_info_log(&self, shader: u32) -> String {
        format!("ERROR: 0:1: shader {shader} has no main()")
    }

    fn delete_shader(&self, shader: u32) {
        let mut state = self.record(Call::DeleteShader(shader));
        state.shaders.remove(&shader);
    }

    fn create_program(&self) -> u32 {
        let mut state = self.record(Call::CreateProgram);
        if state.failures.create_program {
            return 0;
        }
        let id = state.alloc() as u32;
        state.programs.insert(id);
        id
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.push(Call::AttachShader { program, shader });
    }

    fn bind_attrib_location(&self, program: u32, index: u32, name: &str) {
        self.push(Call::BindAttribLocation {
            program,
            index,
            name: name.to_string(),
        });
    }

    fn link_program(&self, program: u32) {
        self.push(Call::LinkProgram(program));
    }

    fn program_linked(&self, _program: u32) -> bool {
        !self.state().failures.link
    }

    fn program_info_log(&self, _program: u32) -> String {
        "ERROR: varying v_TextureCoordinates not written".to_string()
    }

    fn delete_program(&self, program: u32) {
        let mut state = self.record(Call::DeleteProgram(program));
        state.programs.remove(&program);
    }

    fn use_program(&self, program: u32) {
        self.push(Call::UseProgram(program));
    }

    fn attrib_location(&self, _program: u32, name: &str) -> i32 {
        match name {
            "a_Position" => 0,
            "a_TextureCoordinates" => 1,
            _ => -1,
        }
    }

    fn uniform_location(&self, _program: u32, name: &str) -> i32 {
        match name {
            "u_TextureUnit" => 2,
            _ => -1,
        }
    }

    fn uniform_1i(&self, location: i32, value: i32) {
        self.push(Call::Uniform1i { location, value });
    }

    fn clear_color(&self, _rgba: [f32; 4]) {
        self.push(Call::ClearColor);
    }

    fn clear(&self) {
        self.push(Call::Clear);
    }

    fn viewport(&self, width: i32, height: i32) {
        self.push(Call::Viewport { width, height });
    }

    fn gen_texture(&self) -> u32 {
        let mut state = self.record(Call::GenTexture);
        let id = state.alloc() as u32;
        state.textures.insert(id);
        id
    }

    fn active_texture_unit0(&self) {
        self.push(Call::ActiveTexture0);
    }

    fn bind_texture(&self, texture: u32) {
        self.push(Call::BindTexture(texture));
    }

    fn configure_streaming_texture(&self) {
        self.push(Call::ConfigureTexture);
    }

    fn tex_image_rgb565(&self, width: i32, height: i32, pixels: &[u8]) {
        self.push(Call::TexImage {
            width,
            height,
            pixels: pixels.to_vec(),
        });
    }

    fn disable_texture_unit(&self) {
        self.push(Call::DisableTextureUnit);
    }

    fn delete_texture(&self, texture: u32) {
        let mut state = self.record(Call::DeleteTexture(texture));
        state.textures.remove(&texture);
    }

    fn gen_buffer(&self) -> u32 {
        let mut state = self.record(Call::GenBuffer);
        let id = state.alloc() as u32;
        state.buffers.insert(id);
        id
    }

    fn bind_array_buffer(&self, buffer: u32) {
        self.push(Call::BindArrayBuffer(buffer));
    }

    fn upload_static_vertices(&self, data: &[f32]) {
        self.push(Call::UploadVertices(data.len()));
    }

    fn vertex_attrib_pointer(&self, index: u32, components: i32, stride: i32, offset: u32) {
        self.push(Call::VertexAttribPointer {
            index,
            components,
            stride,
            offset,
        });
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.push(Call::EnableVertexAttribArray(index));
    }

    fn draw_triangle_fan(&self, first: i32, count: i32) {
        self.push(Call::DrawTriangleFan { first, count });
    }

    fn delete_buffer(&self, buffer: u32) {
        let mut state = self.record(Call::DeleteBuffer(buffer));
        state.buffers.remove(&buffer);
    }
}
