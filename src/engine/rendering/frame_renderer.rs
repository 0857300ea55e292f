//! ### English
//! Per-frame texture streaming and quad draw.
//!
//! One texture and one static vertex buffer are created per context; each frame re-specifies the
//! texture image and redraws the same full-screen fan.
//!
//! ### 中文
//! 逐帧纹理流式上传与四边形绘制。
//!
//! 每个上下文只创建一个纹理与一个静态顶点缓冲；每帧重新指定纹理图像并重绘同一个全屏扇形。

use std::mem::size_of;

use gleam::gl::{GLsizei, GLuint};
use tracing::{debug, info, warn};

use super::context::GraphicsContext;
use super::shader::ShaderProgram;
use crate::engine::config::RendererConfig;
use crate::engine::egl::EglApi;
use crate::engine::error::ShaderError;
use crate::engine::frame::Frame;
use crate::engine::gles::GlesApi;
use crate::engine::playback::PlaybackState;

const POSITION_COMPONENTS: i32 = 2;
const TEXTURE_COORDINATES_COMPONENTS: i32 = 2;
const STRIDE: GLsizei =
    ((POSITION_COMPONENTS + TEXTURE_COORDINATES_COMPONENTS) as usize * size_of::<f32>()) as GLsizei;
const TEXTURE_COORDINATES_OFFSET: GLuint = (POSITION_COMPONENTS as usize * size_of::<f32>()) as GLuint;
const VERTEX_COUNT: GLsizei = 6;

/// ### English
/// Interleaved `X, Y, S, T`. Center first, then the four corners, closing back on the first
/// corner; drawn as a triangle fan. T is flipped so row 0 of the frame lands at the top.
///
/// ### 中文
/// 交错排列的 `X, Y, S, T`。先中心点，再四个角，最后回到第一个角，按三角扇绘制。
/// T 轴已翻转，使帧的第 0 行显示在顶部。
#[rustfmt::skip]
pub const VERTEX_DATA: [f32; 24] = [
     0.0,  0.0, 0.5, 0.5,
    -1.0, -1.0, 0.0, 1.0,
     1.0, -1.0, 1.0, 1.0,
     1.0,  1.0, 1.0, 0.0,
    -1.0,  1.0, 0.0, 0.0,
    -1.0, -1.0, 0.0, 1.0,
];

/// ### English
/// What one `render_frame` call did.
///
/// ### 中文
/// 一次 `render_frame` 调用的结果。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Presented,
    /// ### English
    /// Drawn, but `eglSwapBuffers` failed (typically the window was just destroyed).
    ///
    /// ### 中文
    /// 已绘制，但 `eglSwapBuffers` 失败（通常是 window 刚被销毁）。
    SwapFailed,
    /// ### English
    /// Paused: no GPU call was made and the frame was dropped.
    ///
    /// ### 中文
    /// 暂停中：未发出任何 GPU 调用，帧被丢弃。
    Discarded,
    /// ### English
    /// First frame seen after `stop`: GPU resources were released instead of drawing.
    ///
    /// ### 中文
    /// `stop` 之后的第一帧：释放 GPU 资源而不绘制。
    TornDown,
    /// ### English
    /// Stopped and already released.
    ///
    /// ### 中文
    /// 已停止且资源已释放。
    Skipped,
    /// ### English
    /// No open context to draw into.
    ///
    /// ### 中文
    /// 没有可绘制的已打开上下文。
    NoContext,
}

/// ### English
/// GPU resources of the draw path for one context.
///
/// ### 中文
/// 某个上下文中绘制路径所持有的 GPU 资源。
#[derive(Debug)]
pub struct FrameRenderer {
    /// ### English
    /// `None` once released.
    ///
    /// ### 中文
    /// 释放后为 `None`。
    resources: Option<Resources>,
    clear_before_draw: bool,
}

#[derive(Debug)]
struct Resources {
    program: ShaderProgram,
    texture: GLuint,
    vertex_buffer: GLuint,
}

impl FrameRenderer {
    /// ### English
    /// Builds the program, texture and vertex buffer. The target context must be current.
    ///
    /// ### 中文
    /// 构建程序、纹理与顶点缓冲；目标上下文必须处于 current 状态。
    pub fn prepare(gl: &impl GlesApi, config: &RendererConfig) -> Result<Self, ShaderError> {
        let program = ShaderProgram::build(gl, &config.vertex_shader, &config.fragment_shader)?;

        gl.clear_color(config.clear_color);

        let texture = gl.gen_texture();
        gl.bind_texture(texture);
        gl.configure_streaming_texture();

        let vertex_buffer = gl.gen_buffer();
        gl.bind_array_buffer(vertex_buffer);
        gl.upload_static_vertices(&VERTEX_DATA);

        debug!(texture, vertex_buffer, "frame renderer prepared");
        Ok(Self {
            resources: Some(Resources {
                program,
                texture,
                vertex_buffer,
            }),
            clear_before_draw: config.clear_before_draw,
        })
    }

    #[cfg(test)]
    pub fn is_released(&self) -> bool {
        self.resources.is_none()
    }

    /// ### English
    /// Draws `frame` into `ctx` according to `state`.
    ///
    /// - `Paused`: returns without any GPU call.
    /// - `Stopped`: releases texture, program and vertex buffer once, then is a no-op.
    /// - `Running`: viewport (frame size) → optional clear → upload → draw fan → swap.
    ///
    /// Attribute and uniform locations come from the cache filled when the program was linked;
    /// nothing is looked up by name per frame.
    ///
    /// ### 中文
    /// 按 `state` 将 `frame` 绘制到 `ctx`。
    ///
    /// - `Paused`：不发出任何 GPU 调用直接返回。
    /// - `Stopped`：释放纹理、程序与顶点缓冲一次，之后不再做任何事。
    /// - `Running`：viewport（帧尺寸）→ 可选清屏 → 上传 → 绘制扇形 → swap。
    ///
    /// attribute 与 uniform 的位置取自程序链接时填充的缓存，每帧不会再按名称查询。
    pub fn render_frame(
        &mut self,
        gl: &impl GlesApi,
        egl: &impl EglApi,
        ctx: &GraphicsContext,
        state: PlaybackState,
        frame: &Frame,
    ) -> FrameOutcome {
        match state {
            PlaybackState::Paused => return FrameOutcome::Discarded,
            PlaybackState::Stopped => {
                return if self.release(gl) {
                    info!("playback stopped, frame resources released");
                    FrameOutcome::TornDown
                } else {
                    FrameOutcome::Skipped
                };
            }
            PlaybackState::Running => {}
        }

        let Some(resources) = &self.resources else {
            return FrameOutcome::Skipped;
        };
        let locations = resources.program.locations();
        let (width, height) = frame.gl_size();

        gl.viewport(width, height);
        if self.clear_before_draw {
            gl.clear();
        }

        gl.use_program(resources.program.id());
        gl.active_texture_unit0();
        gl.bind_texture(resources.texture);
        gl.tex_image_rgb565(width, height, frame.pixels());
        gl.uniform_1i(locations.texture_unit, 0);

        gl.bind_array_buffer(resources.vertex_buffer);
        gl.vertex_attrib_pointer(locations.position, POSITION_COMPONENTS, STRIDE, 0);
        gl.enable_vertex_attrib_array(locations.position);
        gl.vertex_attrib_pointer(
            locations.texture_coordinates,
            TEXTURE_COORDINATES_COMPONENTS,
            STRIDE,
            TEXTURE_COORDINATES_OFFSET,
        );
        gl.enable_vertex_attrib_array(locations.texture_coordinates);

        gl.draw_triangle_fan(0, VERTEX_COUNT);

        match ctx.swap_buffers(egl) {
            Ok(()) => FrameOutcome::Presented,
            Err(code) => {
                warn!("eglSwapBuffers failed: {code:#x}");
                FrameOutcome::SwapFailed
            }
        }
    }

    /// ### English
    /// Unbinds and deletes texture, program and vertex buffer. Returns `false` if already
    /// released. The owning context must still be current.
    ///
    /// ### 中文
    /// 解绑并删除纹理、程序与顶点缓冲；若已释放则返回 `false`。所属上下文必须仍处于 current 状态。
    pub fn release(&mut self, gl: &impl GlesApi) -> bool {
        let Some(resources) = self.resources.take() else {
            return false;
        };

        gl.disable_texture_unit();
        gl.delete_texture(resources.texture);
        resources.program.delete(gl);
        gl.delete_buffer(resources.vertex_buffer);
        true
    }
}
