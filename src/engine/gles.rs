//! ### English
//! GLES2 seam used by `ShaderProgram` and `FrameRenderer`, plus the production implementation on
//! top of gleam's `Gl` function table loaded through `eglGetProcAddress`.
//!
//! ### 中文
//! `ShaderProgram` 与 `FrameRenderer` 使用的 GLES2 接缝，以及基于 gleam `Gl` 函数表
//! （通过 `eglGetProcAddress` 加载）的生产实现。

use std::fmt;
use std::rc::Rc;

use gleam::gl::{self, Gl, GLint, GLsizei, GLuint};

use crate::engine::egl::EglApi;

/// ### English
/// Programmable pipeline stage of one shader object.
///
/// ### 中文
/// 单个 shader 对象所属的可编程管线阶段。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => f.write_str("vertex"),
            Self::Fragment => f.write_str("fragment"),
        }
    }
}

/// ### English
/// The GLES2 calls issued by this crate. Object ids follow GL conventions (`0` = none,
/// negative locations = not found). Calls must run on the thread the context is current on.
///
/// ### 中文
/// 本 crate 发出的 GLES2 调用。对象 ID 遵循 GL 约定（`0` 表示无，负的 location 表示未找到）。
/// 调用必须在上下文 current 的线程上执行。
pub trait GlesApi {
    fn create_shader(&self, stage: ShaderStage) -> GLuint;
    fn shader_source(&self, shader: GLuint, source: &str);
    fn compile_shader(&self, shader: GLuint);
    fn shader_compiled(&self, shader: GLuint) -> bool;
    fn shader_info_log(&self, shader: GLuint) -> String;
    fn delete_shader(&self, shader: GLuint);

    fn create_program(&self) -> GLuint;
    fn attach_shader(&self, program: GLuint, shader: GLuint);
    fn bind_attrib_location(&self, program: GLuint, index: GLuint, name: &str);
    fn link_program(&self, program: GLuint);
    fn program_linked(&self, program: GLuint) -> bool;
    fn program_info_log(&self, program: GLuint) -> String;
    fn delete_program(&self, program: GLuint);
    fn use_program(&self, program: GLuint);
    fn attrib_location(&self, program: GLuint, name: &str) -> GLint;
    fn uniform_location(&self, program: GLuint, name: &str) -> GLint;
    fn uniform_1i(&self, location: GLint, value: GLint);

    fn clear_color(&self, rgba: [f32; 4]);
    fn clear(&self);
    fn viewport(&self, width: GLsizei, height: GLsizei);

    fn gen_texture(&self) -> GLuint;
    fn active_texture_unit0(&self);
    fn bind_texture(&self, texture: GLuint);

    /// ### English
    /// Linear filtering, clamp-to-edge wrapping (NPOT frames) and 2-byte unpack alignment for the
    /// currently bound texture.
    ///
    /// ### 中文
    /// 为当前绑定的纹理设置线性过滤、clamp-to-edge 环绕（支持非 2 次幂尺寸）与 2 字节解包对齐。
    fn configure_streaming_texture(&self);

    /// ### English
    /// Re-specifies the bound texture as `RGB` / `UNSIGNED_SHORT_5_6_5` from `pixels`.
    ///
    /// ### 中文
    /// 以 `RGB` / `UNSIGNED_SHORT_5_6_5` 格式，用 `pixels` 重新指定当前绑定的纹理。
    fn tex_image_rgb565(&self, width: GLsizei, height: GLsizei, pixels: &[u8]);
    fn disable_texture_unit(&self);
    fn delete_texture(&self, texture: GLuint);

    fn gen_buffer(&self) -> GLuint;
    fn bind_array_buffer(&self, buffer: GLuint);
    fn upload_static_vertices(&self, data: &[f32]);
    fn vertex_attrib_pointer(&self, index: GLuint, components: GLint, stride: GLsizei, offset: GLuint);
    fn enable_vertex_attrib_array(&self, index: GLuint);
    fn draw_triangle_fan(&self, first: GLint, count: GLsizei);
    fn delete_buffer(&self, buffer: GLuint);
}

/// ### English
/// gleam-backed `GlesApi` (cheap clone of an `Rc`).
///
/// ### 中文
/// 基于 gleam 的 `GlesApi`（`Rc` 的低成本 clone）。
#[derive(Clone)]
pub struct GleamGles {
    gl: Rc<dyn Gl>,
}

impl GleamGles {
    /// ### English
    /// Loads the GLES function table through `egl`'s proc loader.
    /// Must be called on the render thread.
    ///
    /// ### 中文
    /// 通过 `egl` 的函数加载器加载 GLES 函数表。
    /// 必须在渲染线程调用。
    pub fn load(egl: &impl EglApi) -> Self {
        let gl = unsafe { gl::GlesFns::load_with(|name| egl.get_proc_address(name)) };
        Self { gl }
    }

    fn get_shader_i(&self, shader: GLuint, pname: gl::GLenum) -> GLint {
        let mut value = [0];
        // Scalar queries write exactly one value.
        unsafe { self.gl.get_shader_iv(shader, pname, &mut value) };
        value[0]
    }

    fn get_program_i(&self, program: GLuint, pname: gl::GLenum) -> GLint {
        let mut value = [0];
        unsafe { self.gl.get_program_iv(program, pname, &mut value) };
        value[0]
    }
}

impl GlesApi for GleamGles {
    fn create_shader(&self, stage: ShaderStage) -> GLuint {
        self.gl.create_shader(match stage {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        })
    }

    fn shader_source(&self, shader: GLuint, source: &str) {
        self.gl.shader_source(shader, &[source.as_bytes()]);
    }

    fn compile_shader(&self, shader: GLuint) {
        self.gl.compile_shader(shader);
    }

    fn shader_compiled(&self, shader: GLuint) -> bool {
        self.get_shader_i(shader, gl::COMPILE_STATUS) != 0
    }

    fn shader_info_log(&self, shader: GLuint) -> String {
        self.gl.get_shader_info_log(shader)
    }

    fn delete_shader(&self, shader: GLuint) {
        self.gl.delete_shader(shader);
    }

    fn create_program(&self) -> GLuint {
        self.gl.create_program()
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        self.gl.attach_shader(program, shader);
    }

    fn bind_attrib_location(&self, program: GLuint, index: GLuint, name: &str) {
        self.gl.bind_attrib_location(program, index, name);
    }

    fn link_program(&self, program: GLuint) {
        self.gl.link_program(program);
    }

    fn program_linked(&self, program: GLuint) -> bool {
        self.get_program_i(program, gl::LINK_STATUS) != 0
    }

    fn program_info_log(&self, program: GLuint) -> String {
        self.gl.get_program_info_log(program)
    }

    fn delete_program(&self, program: GLuint) {
        self.gl.delete_program(program);
    }

    fn use_program(&self, program: GLuint) {
        self.gl.use_program(program);
    }

    fn attrib_location(&self, program: GLuint, name: &str) -> GLint {
        self.gl.get_attrib_location(program, name)
    }

    fn uniform_location(&self, program: GLuint, name: &str) -> GLint {
        self.gl.get_uniform_location(program, name)
    }

    fn uniform_1i(&self, location: GLint, value: GLint) {
        self.gl.uniform_1i(location, value);
    }

    fn clear_color(&self, rgba: [f32; 4]) {
        self.gl.clear_color(rgba[0], rgba[1], rgba[2], rgba[3]);
    }

    fn clear(&self) {
        self.gl.clear(gl::COLOR_BUFFER_BIT);
    }

    fn viewport(&self, width: GLsizei, height: GLsizei) {
        self.gl.viewport(0, 0, width, height);
    }

    fn gen_texture(&self) -> GLuint {
        self.gl.gen_textures(1)[0]
    }

    fn active_texture_unit0(&self) {
        self.gl.active_texture(gl::TEXTURE0);
    }

    fn bind_texture(&self, texture: GLuint) {
        self.gl.bind_texture(gl::TEXTURE_2D, texture);
    }

    fn configure_streaming_texture(&self) {
        self.gl
            .tex_parameter_i(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR as GLint);
        self.gl
            .tex_parameter_i(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::LINEAR as GLint);
        self.gl
            .tex_parameter_i(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as GLint);
        self.gl
            .tex_parameter_i(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE as GLint);
        self.gl.pixel_store_i(gl::UNPACK_ALIGNMENT, 2);
    }

    fn tex_image_rgb565(&self, width: GLsizei, height: GLsizei, pixels: &[u8]) {
        self.gl.tex_image_2d(
            gl::TEXTURE_2D,
            0,
            gl::RGB as GLint,
            width,
            height,
            0,
            gl::RGB,
            gl::UNSIGNED_SHORT_5_6_5,
            Some(pixels),
        );
    }

    fn disable_texture_unit(&self) {
        self.gl.bind_texture(gl::TEXTURE_2D, 0);
    }

    fn delete_texture(&self, texture: GLuint) {
        self.gl.delete_textures(&[texture]);
    }

    fn gen_buffer(&self) -> GLuint {
        self.gl.gen_buffers(1)[0]
    }

    fn bind_array_buffer(&self, buffer: GLuint) {
        self.gl.bind_buffer(gl::ARRAY_BUFFER, buffer);
    }

    fn upload_static_vertices(&self, data: &[f32]) {
        gl::buffer_data(&*self.gl, gl::ARRAY_BUFFER, data, gl::STATIC_DRAW);
    }

    fn vertex_attrib_pointer(&self, index: GLuint, components: GLint, stride: GLsizei, offset: GLuint) {
        self.gl
            .vertex_attrib_pointer(index, components, gl::FLOAT, false, stride, offset);
    }

    fn enable_vertex_attrib_array(&self, index: GLuint) {
        self.gl.enable_vertex_attrib_array(index);
    }

    fn draw_triangle_fan(&self, first: GLint, count: GLsizei) {
        self.gl.draw_arrays(gl::TRIANGLE_FAN, first, count);
    }

    fn delete_buffer(&self, buffer: GLuint) {
        self.gl.delete_buffers(&[buffer]);
    }
}
