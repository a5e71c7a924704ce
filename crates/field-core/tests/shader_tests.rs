// Host-side WGSL validation; catches shader breakage without a GPU.

use field_core::{
    HorizonUniforms, SimUniforms, ViewUniforms, HORIZON_WGSL, POINTS_WGSL, SIMULATE_WGSL,
};

fn validate(source: &str) -> naga::Module {
    let module = naga::front::wgsl::parse_str(source)
        .unwrap_or_else(|e| panic!("WGSL parse error: {}", e.emit_to_string(source)));
    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    )
    .validate(&module)
    .unwrap_or_else(|e| panic!("WGSL validation error: {e:?}"));
    module
}

fn entry_points(module: &naga::Module) -> Vec<(&str, naga::ShaderStage)> {
    module
        .entry_points
        .iter()
        .map(|ep| (ep.name.as_str(), ep.stage))
        .collect()
}

/// Byte size of the named WGSL struct as laid out by naga.
fn struct_size(module: &naga::Module, name: &str) -> u32 {
    let mut layouter = naga::proc::Layouter::default();
    layouter.update(module.to_ctx()).expect("layout");
    let (handle, _) = module
        .types
        .iter()
        .find(|(_, ty)| ty.name.as_deref() == Some(name))
        .unwrap_or_else(|| panic!("struct {name} not found"));
    layouter[handle].size
}

#[test]
fn simulate_shader_validates() {
    let module = validate(SIMULATE_WGSL);
    assert_eq!(
        entry_points(&module),
        vec![("cs_main", naga::ShaderStage::Compute)]
    );
}

#[test]
fn points_shader_validates() {
    let module = validate(POINTS_WGSL);
    let eps = entry_points(&module);
    assert!(eps.contains(&("vs_main", naga::ShaderStage::Vertex)));
    assert!(eps.contains(&("fs_main", naga::ShaderStage::Fragment)));
}

#[test]
fn horizon_shader_validates() {
    let module = validate(HORIZON_WGSL);
    let eps = entry_points(&module);
    assert!(eps.contains(&("vs_main", naga::ShaderStage::Vertex)));
    assert!(eps.contains(&("fs_main", naga::ShaderStage::Fragment)));
}

#[test]
fn uniform_layouts_match_host_structs() {
    let sim = validate(SIMULATE_WGSL);
    assert_eq!(
        struct_size(&sim, "SimUniforms") as usize,
        std::mem::size_of::<SimUniforms>()
    );
    let points = validate(POINTS_WGSL);
    assert_eq!(
        struct_size(&points, "ViewUniforms") as usize,
        std::mem::size_of::<ViewUniforms>()
    );
    let horizon = validate(HORIZON_WGSL);
    assert_eq!(
        struct_size(&horizon, "HorizonUniforms") as usize,
        std::mem::size_of::<HorizonUniforms>()
    );
}
