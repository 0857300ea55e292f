//! ### English
//! Renderer configuration: shader sources, clear color, frame queue depth.
//!
//! ### 中文
//! 渲染器配置：shader 源码、清屏颜色、帧队列深度。

use tracing::warn;

use crate::engine::flags;

/// ### English
/// Attribute bound to slot 0 before linking.
///
/// ### 中文
/// 链接前绑定到槽位 0 的 attribute。
pub const POSITION_ATTRIBUTE: &str = "a_Position";
pub const TEXTURE_COORDINATES_ATTRIBUTE: &str = "a_TextureCoordinates";
pub const TEXTURE_UNIT_UNIFORM: &str = "u_TextureUnit";

pub const VERTEX_SHADER_SOURCE: &str = "\
attribute vec4 a_Position;
attribute vec2 a_TextureCoordinates;
varying vec2 v_TextureCoordinates;
void main()
{
    v_TextureCoordinates = a_TextureCoordinates;
    gl_Position = a_Position;
}
";

pub const FRAGMENT_SHADER_SOURCE: &str = "\
precision mediump float;
uniform sampler2D u_TextureUnit;
varying vec2 v_TextureCoordinates;
void main()
{
    gl_FragColor = texture2D(u_TextureUnit, v_TextureCoordinates);
}
";

pub const DEFAULT_FRAME_QUEUE_CAPACITY: usize = 4;

/// ### English
/// Upper bound on the frame queue. The channel allocates every slot up front.
///
/// ### 中文
/// 帧队列容量上限；通道会预先分配全部槽位。
pub const MAX_FRAME_QUEUE_CAPACITY: usize = 64;

/// ### English
/// Settings fixed for the lifetime of one renderer session.
///
/// ### 中文
/// 在一个渲染会话生命周期内固定不变的设置。
#[derive(Clone, Debug, PartialEq)]
pub struct RendererConfig {
    pub vertex_shader: String,
    pub fragment_shader: String,
    /// ### English
    /// RGBA clear color (opaque black by default).
    ///
    /// ### 中文
    /// RGBA 清屏颜色（默认不透明黑色）。
    pub clear_color: [f32; 4],
    pub clear_before_draw: bool,
    /// ### English
    /// Frames buffered between the decode producer and the render thread before `deliver_frame`
    /// blocks.
    ///
    /// ### 中文
    /// 解码生产者与渲染线程之间可缓冲的帧数，超过后 `deliver_frame` 会阻塞。
    pub frame_queue_capacity: usize,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            vertex_shader: VERTEX_SHADER_SOURCE.to_string(),
            fragment_shader: FRAGMENT_SHADER_SOURCE.to_string(),
            clear_color: [0.0, 0.0, 0.0, 1.0],
            clear_before_draw: false,
            frame_queue_capacity: DEFAULT_FRAME_QUEUE_CAPACITY,
        }
    }
}

impl RendererConfig {
    /// ### English
    /// Builds a config from C ABI inputs.
    ///
    /// #### Parameters
    /// - `flags`: `VIDEO_SURFACE_FLAG_*` bitmask.
    /// - `frame_queue_capacity`: Queue depth (`0` means the default, values above
    ///   `MAX_FRAME_QUEUE_CAPACITY` are clamped).
    ///
    /// ### 中文
    /// 根据 C ABI 输入构建配置。
    ///
    /// #### 参数
    /// - `flags`：`VIDEO_SURFACE_FLAG_*` 位掩码。
    /// - `frame_queue_capacity`：队列深度（`0` 表示默认值，超过 `MAX_FRAME_QUEUE_CAPACITY` 时取上限）。
    pub fn from_flags(flags: u32, frame_queue_capacity: u32) -> Self {
        let frame_queue_capacity = match frame_queue_capacity {
            0 => DEFAULT_FRAME_QUEUE_CAPACITY,
            n if n as usize > MAX_FRAME_QUEUE_CAPACITY => {
                warn!("frame queue capacity {n} clamped to {MAX_FRAME_QUEUE_CAPACITY}");
                MAX_FRAME_QUEUE_CAPACITY
            }
            n => n as usize,
        };

        Self {
            clear_before_draw: (flags & flags::VIDEO_SURFACE_FLAG_CLEAR_BEFORE_DRAW) != 0,
            frame_queue_capacity,
            ..Self::default()
        }
    }
}
