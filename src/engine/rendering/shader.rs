//! ### English
//! Vertex + fragment program build for the frame quad.
//!
//! ### 中文
//! 帧四边形使用的顶点 + 片元程序构建。

use gleam::gl::{GLint, GLuint};
use tracing::{debug, error};

use crate::engine::config::{
    POSITION_ATTRIBUTE, TEXTURE_COORDINATES_ATTRIBUTE, TEXTURE_UNIT_UNIFORM,
};
use crate::engine::error::ShaderError;
use crate::engine::gles::{GlesApi, ShaderStage};

/// ### English
/// Attribute slot bound to `a_Position` before linking.
///
/// ### 中文
/// 链接前绑定给 `a_Position` 的 attribute 槽位。
pub const POSITION_SLOT: GLuint = 0;

/// ### English
/// Locations resolved once after a successful link.
///
/// ### 中文
/// 链接成功后一次性解析的 location。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgramLocations {
    pub position: GLuint,
    pub texture_coordinates: GLuint,
    pub texture_unit: GLint,
}

/// ### English
/// A linked program. Shader stage objects are already deleted; only the program id remains.
/// The id is only valid for the context it was built in.
///
/// ### 中文
/// 已链接的程序。各阶段 shader 对象已删除，仅保留 program id。
/// 该 id 只在构建它的上下文中有效。
#[derive(Debug, PartialEq, Eq)]
pub struct ShaderProgram {
    id: GLuint,
    locations: ProgramLocations,
}

impl ShaderProgram {
    /// ### English
    /// Compiles both stages, binds `a_Position` to slot 0, links, then resolves locations.
    ///
    /// Nothing is left allocated on failure: a failed stage is deleted (together with an already
    /// compiled vertex stage), a failed link deletes the program.
    ///
    /// ### 中文
    /// 编译两个阶段，将 `a_Position` 绑定到槽位 0，链接，然后解析 location。
    ///
    /// 失败时不会残留任何对象：失败的阶段会被删除（连同已编译的顶点阶段），链接失败会删除程序。
    pub fn build(
        gl: &impl GlesApi,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, ShaderError> {
        let vertex = compile(gl, ShaderStage::Vertex, vertex_source)?;
        let fragment = match compile(gl, ShaderStage::Fragment, fragment_source) {
            Ok(fragment) => fragment,
            Err(err) => {
                gl.delete_shader(vertex);
                return Err(err);
            }
        };

        let id = link(gl, vertex, fragment);
        gl.delete_shader(vertex);
        gl.delete_shader(fragment);
        let id = id?;

        let locations = match resolve_locations(gl, id) {
            Ok(locations) => locations,
            Err(err) => {
                error!("shader program {id}: {err}");
                gl.delete_program(id);
                return Err(err);
            }
        };

        debug!(program = id, ?locations, "shader program linked");
        Ok(Self { id, locations })
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn locations(&self) -> ProgramLocations {
        self.locations
    }

    /// ### English
    /// Deletes the program. The context it was built in must be current.
    ///
    /// ### 中文
    /// 删除程序；构建它的上下文必须处于 current 状态。
    pub fn delete(self, gl: &impl GlesApi) {
        gl.delete_program(self.id);
    }
}

fn compile(gl: &impl GlesApi, stage: ShaderStage, source: &str) -> Result<GLuint, ShaderError> {
    let shader = gl.create_shader(stage);
    if shader == 0 {
        error!("glCreateShader({stage}) returned 0");
        return Err(ShaderError::ObjectCreateFailed { object: "Shader" });
    }

    gl.shader_source(shader, source);
    gl.compile_shader(shader);
    if gl.shader_compiled(shader) {
        return Ok(shader);
    }

    let log = gl.shader_info_log(shader);
    error!("could not compile {stage} shader:\n{log}");
    gl.delete_shader(shader);
    Err(ShaderError::Compile { stage, log })
}

fn link(gl: &impl GlesApi, vertex: GLuint, fragment: GLuint) -> Result<GLuint, ShaderError> {
    let program = gl.create_program();
    if program == 0 {
        error!("glCreateProgram returned 0");
        return Err(ShaderError::ObjectCreateFailed { object: "Program" });
    }

    gl.attach_shader(program, vertex);
    gl.attach_shader(program, fragment);
    gl.bind_attrib_location(program, POSITION_SLOT, POSITION_ATTRIBUTE);
    gl.link_program(program);
    if gl.program_linked(program) {
        return Ok(program);
    }

    let log = gl.program_info_log(program);
    error!("could not link program:\n{log}");
    gl.delete_program(program);
    Err(ShaderError::Link { log })
}

fn resolve_locations(gl: &impl GlesApi, program: GLuint) -> Result<ProgramLocations, ShaderError> {
    let attrib = |name: &'static str| {
        GLuint::try_from(gl.attrib_location(program, name))
            .map_err(|_| ShaderError::MissingLocation { name })
    };

    let position = attrib(POSITION_ATTRIBUTE)?;
    let texture_coordinates = attrib(TEXTURE_COORDINATES_ATTRIBUTE)?;
    let texture_unit = gl.uniform_location(program, TEXTURE_UNIT_UNIFORM);
    if texture_unit < 0 {
        return Err(ShaderError::MissingLocation {
            name: TEXTURE_UNIT_UNIFORM,
        });
    }

    Ok(ProgramLocations {
        position,
        texture_coordinates,
        texture_unit,
    })
}
