use reactor_story::shaders::{self, ProgramSource, MAX_POINT_LIGHTS};

fn programs() -> [ProgramSource; 5] {
    [
        shaders::core_program(),
        shaders::rock_program(),
        shaders::ray_program(),
        shaders::star_program(),
        shaders::post_program(),
    ]
}

#[test]
fn every_stage_is_glsl_es_3() {
    for program in programs() {
        for source in [&program.vertex, &program.fragment] {
            assert!(source.starts_with("#version 300 es\n"), "{} stage lacks version line", program.label);
            assert_eq!(source.matches("#version").count(), 1, "{}", program.label);
        }
        assert!(program.vertex.contains("void main()"), "{}", program.label);
        assert!(program.fragment.contains("out vec4 fragColor"), "{}", program.label);
    }
}

#[test]
fn labels_are_unique() {
    let labels: Vec<_> = programs().iter().map(|p| p.label).collect();
    for (i, label) in labels.iter().enumerate() {
        assert!(!labels[i + 1..].contains(label), "duplicate {label}");
    }
}

#[test]
fn only_the_core_embeds_noise() {
    assert!(shaders::core_program().vertex.contains("float snoise(vec3 v){"));
    assert!(!shaders::rock_program().vertex.contains("snoise"));
}

#[test]
fn light_array_size_matches_host() {
    let fragment = shaders::rock_program().fragment;
    assert!(fragment.contains(&format!("#define MAX_POINT_LIGHTS {MAX_POINT_LIGHTS}")));
}
