use glam::{Mat4, Vec3};

/// Uniform names shared by the traversal and every shader program.
pub mod uniforms {
    pub const VIEW: &str = "u_View";
    pub const PROJECTION: &str = "u_Projection";
    pub const VIEW_POS: &str = "u_ViewPos";
    pub const LIGHT_POS: &str = "u_LightPos";
    pub const LIGHT_COLOR: &str = "u_LightColor";
    pub const MODEL: &str = "u_Model";

    pub const ALL: [&str; 6] = [VIEW, PROJECTION, VIEW_POS, LIGHT_POS, LIGHT_COLOR, MODEL];
}

/// A bound shader program that accepts named uniforms.
///
/// Uploading an unknown name is not an error; programs ignore uniforms they
/// do not declare.
pub trait Shader {
    fn bind(&mut self);
    fn upload_mat4(&mut self, name: &str, value: &Mat4);
    fn upload_vec3(&mut self, name: &str, value: Vec3);
    fn set_int(&mut self, name: &str, value: i32);
}

/// GLSL 3.30 vertex stage matching the [`Vertex`](plume_assets::Vertex) layout.
pub const PHONG_VERTEX_SRC: &str = r#"#version 330 core
layout (location = 0) in vec3 a_Position;
layout (location = 1) in vec3 a_Normal;
layout (location = 2) in vec2 a_TexCoords;

uniform mat4 u_Model;
uniform mat4 u_View;
uniform mat4 u_Projection;

out vec3 v_FragPos;
out vec3 v_Normal;
out vec2 v_TexCoords;

void main() {
    v_FragPos = vec3(u_Model * vec4(a_Position, 1.0));
    v_Normal = mat3(transpose(inverse(u_Model))) * a_Normal;
    v_TexCoords = a_TexCoords;
    gl_Position = u_Projection * u_View * vec4(v_FragPos, 1.0);
}
"#;

/// Single point light, Phong shading, first diffuse/specular sampler.
pub const PHONG_FRAGMENT_SRC: &str = r#"#version 330 core
in vec3 v_FragPos;
in vec3 v_Normal;
in vec2 v_TexCoords;

uniform sampler2D texture_diffuse1;
uniform sampler2D texture_specular1;
uniform vec3 u_LightPos;
uniform vec3 u_LightColor;
uniform vec3 u_ViewPos;

out vec4 FragColor;

void main() {
    vec3 albedo = texture(texture_diffuse1, v_TexCoords).rgb;
    vec3 normal = normalize(v_Normal);
    vec3 light_dir = normalize(u_LightPos - v_FragPos);
    vec3 view_dir = normalize(u_ViewPos - v_FragPos);
    vec3 reflect_dir = reflect(-light_dir, normal);

    vec3 ambient = 0.1 * u_LightColor * albedo;
    vec3 diffuse = max(dot(normal, light_dir), 0.0) * u_LightColor * albedo;
    float spec = pow(max(dot(view_dir, reflect_dir), 0.0), 32.0);
    vec3 specular = spec * u_LightColor * texture(texture_specular1, v_TexCoords).rgb;

    FragColor = vec4(ambient + diffuse + specular, 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sources_declare_every_uniform() {
        let both = format!("{PHONG_VERTEX_SRC}{PHONG_FRAGMENT_SRC}");
        for name in uniforms::ALL {
            let declared = both.contains(&format!("uniform mat4 {name};"))
                || both.contains(&format!("uniform vec3 {name};"));
            assert!(declared, "missing {name}");
        }
    }

    #[test]
    fn sampler_names_follow_texture_kind_prefixes() {
        use plume_assets::TextureKind;
        for kind in [TextureKind::Diffuse, TextureKind::Specular] {
            assert!(PHONG_FRAGMENT_SRC.contains(&format!("{}1", kind.uniform_prefix())));
        }
    }
}
